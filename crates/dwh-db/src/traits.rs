//! Database trait definition

use crate::error::{DbError, DbResult};
use async_trait::async_trait;
use dwh_core::Statement;

/// Database abstraction trait for the warehouse
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Execute query returning row count
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Execute query returning every value rendered as text (`None` for NULL)
    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<Option<String>>>>;

    /// Query and return sample rows as formatted strings
    /// Returns up to `limit` rows, each as a comma-separated string
    async fn query_sample_rows(&self, sql: &str, limit: usize) -> DbResult<Vec<String>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Execute generated statements in order, stopping at the first failure
    async fn execute_statements(&self, statements: &[Statement]) -> DbResult<usize> {
        let mut affected = 0;
        for stmt in statements {
            log::debug!("[{}] {} {}", self.db_type(), stmt.phase, stmt.table);
            match self.execute(&stmt.sql).await {
                Ok(rows) => affected += rows,
                Err(e) => {
                    log::warn!("{} statement for '{}' failed: {}", stmt.phase, stmt.table, e);
                    return Err(DbError::StatementFailed {
                        phase: stmt.phase,
                        table: stmt.table.clone(),
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(affected)
    }
}
