//! Generated statements and the phases they run in

use serde::Serialize;
use std::fmt;

use crate::table_name::TableName;

/// One of the four ordered groups of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Drop every table if it exists
    Drop,
    /// Create every table if it does not exist
    Create,
    /// Bulk load the staging tables
    Copy,
    /// Populate the fact and dimension tables from staging
    Insert,
}

impl Phase {
    /// All phases in execution order
    pub const ALL: [Phase; 4] = [Phase::Drop, Phase::Create, Phase::Copy, Phase::Insert];

    /// Whether statements of this phase need bulk-load configuration
    pub fn needs_copy_sources(self) -> bool {
        self == Phase::Copy
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Drop => write!(f, "drop"),
            Phase::Create => write!(f, "create"),
            Phase::Copy => write!(f, "copy"),
            Phase::Insert => write!(f, "insert"),
        }
    }
}

/// A single SQL statement targeting one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// Phase the statement belongs to
    pub phase: Phase,
    /// Table the statement drops, creates or writes
    pub table: TableName,
    /// SQL text, without a trailing semicolon
    pub sql: String,
}

impl Statement {
    /// Create a statement
    pub fn new(phase: Phase, table: &str, sql: impl Into<String>) -> Self {
        Self {
            phase,
            table: TableName::new(table),
            sql: sql.into(),
        }
    }

    /// SQL text
    pub fn as_sql(&self) -> &str {
        &self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
