//! Statement builder
//!
//! Renders the four statement phases of a pipeline run for one dialect:
//!
//! 1. [`drop_statements`](StatementBuilder::drop_statements): `DROP TABLE IF EXISTS`, every table
//! 2. [`create_statements`](StatementBuilder::create_statements): `CREATE TABLE IF NOT EXISTS`, every table
//! 3. [`copy_statements`](StatementBuilder::copy_statements): bulk load both staging tables
//! 4. [`insert_statements`](StatementBuilder::insert_statements): populate the fact and dimension tables
//!
//! Every call renders fresh statements; nothing is cached between calls.

use crate::catalog::{self, ALL_TABLES, STAGING_EVENTS, STAGING_SONGS};
use crate::config::CopySources;
use crate::dialect::{Dialect, DialectKind, JsonCopy, JsonFormat};
use crate::schema::{Column, TableDef};
use crate::statement::{Phase, Statement};
use crate::transform;

/// Renders warehouse statements for a dialect
pub struct StatementBuilder {
    dialect: Box<dyn Dialect>,
}

impl StatementBuilder {
    /// Create a builder for a dialect
    pub fn new(kind: DialectKind) -> Self {
        Self::with_dialect(kind.dialect())
    }

    /// Create a builder for a custom dialect implementation
    pub fn with_dialect(dialect: Box<dyn Dialect>) -> Self {
        Self { dialect }
    }

    /// The dialect statements are rendered for
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// One `DROP TABLE IF EXISTS` per table
    pub fn drop_statements(&self) -> Vec<Statement> {
        let statements: Vec<Statement> = ALL_TABLES
            .iter()
            .map(|table| {
                Statement::new(
                    Phase::Drop,
                    table.name,
                    format!("DROP TABLE IF EXISTS {}", self.dialect.quote_table(table.name)),
                )
            })
            .collect();
        log::debug!("Rendered {} drop statements ({})", statements.len(), self.dialect.name());
        statements
    }

    /// One `CREATE TABLE IF NOT EXISTS` per table
    pub fn create_statements(&self) -> Vec<Statement> {
        let statements: Vec<Statement> = ALL_TABLES
            .iter()
            .map(|table| Statement::new(Phase::Create, table.name, self.create_table(table)))
            .collect();
        log::debug!("Rendered {} create statements ({})", statements.len(), self.dialect.name());
        statements
    }

    /// Bulk loads for `staging_events` (through the JSONPaths file) and
    /// `staging_songs` (structure inferred)
    pub fn copy_statements(&self, sources: &CopySources) -> Vec<Statement> {
        let events = JsonCopy {
            from: sources.log_data().as_str(),
            iam_role_arn: sources.iam_role_arn().as_str(),
            region: sources.region(),
            format: JsonFormat::JsonPaths(sources.log_jsonpath().as_str()),
        };
        let songs = JsonCopy {
            from: sources.song_data().as_str(),
            format: JsonFormat::Auto,
            ..events
        };

        let statements = vec![
            Statement::new(
                Phase::Copy,
                STAGING_EVENTS.name,
                self.dialect.copy_json(STAGING_EVENTS.name, &events),
            ),
            Statement::new(
                Phase::Copy,
                STAGING_SONGS.name,
                self.dialect.copy_json(STAGING_SONGS.name, &songs),
            ),
        ];
        debug_assert_eq!(statements.len(), catalog::staging_tables().count());
        log::debug!("Rendered {} copy statements ({})", statements.len(), self.dialect.name());
        statements
    }

    /// One `INSERT ... SELECT` per fact and dimension table
    pub fn insert_statements(&self) -> Vec<Statement> {
        let statements: Vec<Statement> = transform::all(self.dialect())
            .iter()
            .map(|t| Statement::new(Phase::Insert, t.target.name, t.render(self.dialect())))
            .collect();
        log::debug!("Rendered {} insert statements ({})", statements.len(), self.dialect.name());
        statements
    }

    /// Statements of a single phase
    ///
    /// Returns `None` for the copy phase when no sources are given.
    pub fn phase_statements(
        &self,
        phase: Phase,
        sources: Option<&CopySources>,
    ) -> Option<Vec<Statement>> {
        match phase {
            Phase::Drop => Some(self.drop_statements()),
            Phase::Create => Some(self.create_statements()),
            Phase::Copy => sources.map(|s| self.copy_statements(s)),
            Phase::Insert => Some(self.insert_statements()),
        }
    }

    fn create_table(&self, table: &TableDef) -> String {
        let columns: Vec<String> = table.columns.iter().map(|c| self.column_def(c)).collect();
        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.dialect.quote_table(table.name),
            columns.join(",\n    ")
        );
        if let Some(clause) = table
            .sort_key
            .and_then(|key| self.dialect.sort_key_clause(key))
        {
            sql.push('\n');
            sql.push_str(&clause);
        }
        sql
    }

    fn column_def(&self, column: &Column) -> String {
        let mut def = format!("{} {}", column.name, self.dialect.column_type(column));
        if column.primary_key {
            def.push_str(" PRIMARY KEY");
        }
        if column.not_null {
            def.push_str(" NOT NULL");
        }
        def
    }
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new(DialectKind::default())
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
