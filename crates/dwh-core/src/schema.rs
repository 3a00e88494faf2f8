//! Typed schema model for warehouse tables
//!
//! Tables are declared once as `const` values (see [`crate::catalog`]) and
//! every statement that mentions a table's columns is rendered from that one
//! declaration.

use serde::Serialize;
use std::fmt;

/// Logical column type, rendered per dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    BigInt,
    /// Single-precision float
    Real,
    /// Variable-length string
    Varchar,
    /// Fixed-length string
    Char(u16),
    /// Timestamp without time zone
    Timestamp,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "INTEGER"),
            ColumnType::BigInt => write!(f, "BIGINT"),
            ColumnType::Real => write!(f, "REAL"),
            ColumnType::Varchar => write!(f, "VARCHAR"),
            ColumnType::Char(len) => write!(f, "CHAR({})", len),
            ColumnType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}

/// A column declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name
    pub name: &'static str,
    /// Logical type
    pub data_type: ColumnType,
    /// Whether the column rejects nulls
    pub not_null: bool,
    /// Whether the column is the table's primary key
    pub primary_key: bool,
    /// Whether the engine generates the value (surrogate key)
    pub identity: bool,
}

impl Column {
    /// A nullable column with no constraints
    pub const fn new(name: &'static str, data_type: ColumnType) -> Self {
        Self {
            name,
            data_type,
            not_null: false,
            primary_key: false,
            identity: false,
        }
    }

    /// Mark the column NOT NULL
    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Mark the column as the primary key
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark the column as an engine-generated surrogate key
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }
}

/// Role a table plays in the star schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Raw landing table, bulk loaded from object storage
    Staging,
    /// Measured events
    Fact,
    /// Deduplicated lookup table
    Dimension,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Staging => write!(f, "staging"),
            TableKind::Fact => write!(f, "fact"),
            TableKind::Dimension => write!(f, "dimension"),
        }
    }
}

/// A table declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableDef {
    /// Table name
    pub name: &'static str,
    /// Staging, fact or dimension
    pub kind: TableKind,
    /// Columns in declaration order
    pub columns: &'static [Column],
    /// Column the engine should physically order rows by
    pub sort_key: Option<&'static str>,
}

impl TableDef {
    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary key column, if the table declares one
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Columns an `INSERT` must supply (everything except generated keys)
    pub fn insertable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.identity)
    }

    /// Whether this is a staging table
    pub fn is_staging(&self) -> bool {
        self.kind == TableKind::Staging
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
