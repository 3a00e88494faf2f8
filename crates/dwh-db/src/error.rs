//! Error types for dwh-db

use dwh_core::{Phase, TableName};
use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Mutex poisoned (D004)
    #[error("[D004] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// A pipeline statement failed (D005)
    #[error("[D005] {phase} statement for '{table}' failed: {source}")]
    StatementFailed {
        phase: Phase,
        table: TableName,
        source: Box<DbError>,
    },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// Whether the engine rejected the statement for violating a constraint
    /// (primary key, NOT NULL)
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            DbError::ExecutionError(msg) => msg.contains("Constraint Error"),
            DbError::StatementFailed { source, .. } => source.is_constraint_violation(),
            _ => false,
        }
    }
}

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants, so catalog
        // errors are recognised from the message text.
        let msg = err.to_string();
        if msg.contains("Table with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
