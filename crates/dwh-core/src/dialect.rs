//! SQL dialect abstraction
//!
//! Statements are rendered for Amazon Redshift in production. The DuckDB
//! dialect renders the same schema and transforms for an embedded engine so
//! the pipeline can be exercised locally.

use serde::{Deserialize, Serialize};

use crate::schema::Column;
use crate::sql_utils::{quote_ident, quote_literal};

/// Dialect selector used in configuration and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// Amazon Redshift (default)
    #[default]
    Redshift,
    /// DuckDB
    DuckDb,
}

impl DialectKind {
    /// Instantiate the dialect
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            DialectKind::Redshift => Box::new(RedshiftDialect),
            DialectKind::DuckDb => Box::new(DuckDbDialect),
        }
    }
}

impl std::fmt::Display for DialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialectKind::Redshift => write!(f, "redshift"),
            DialectKind::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// How a bulk load interprets its JSON source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat<'a> {
    /// Match JSON keys to column names
    Auto,
    /// Map fields through a JSONPaths file at this location
    JsonPaths(&'a str),
}

/// Parameters of one bulk load from object storage
#[derive(Debug, Clone, Copy)]
pub struct JsonCopy<'a> {
    /// Object-store location of the data
    pub from: &'a str,
    /// Role the engine assumes to read the data
    pub iam_role_arn: &'a str,
    /// Bucket region, when it differs from the cluster's
    pub region: Option<&'a str>,
    /// Field mapping
    pub format: JsonFormat<'a>,
}

/// Trait for SQL dialect implementations
pub trait Dialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Quote a table name for use in a statement
    fn quote_table(&self, name: &str) -> String;

    /// Column type plus any generated-value clause
    fn column_type(&self, column: &Column) -> String;

    /// Trailing physical ordering clause for `CREATE TABLE`
    fn sort_key_clause(&self, column: &str) -> Option<String>;

    /// Expression converting epoch milliseconds to a timestamp truncated to
    /// whole seconds
    fn epoch_ms_to_timestamp(&self, expr: &str) -> String;

    /// Expression yielding the weekday name of a timestamp
    fn weekday_name(&self, expr: &str) -> String;

    /// Bulk load a table from JSON in object storage
    fn copy_json(&self, table: &str, copy: &JsonCopy<'_>) -> String;
}

/// Amazon Redshift SQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct RedshiftDialect;

impl Dialect for RedshiftDialect {
    fn name(&self) -> &'static str {
        "redshift"
    }

    fn quote_table(&self, name: &str) -> String {
        name.to_string()
    }

    fn column_type(&self, column: &Column) -> String {
        if column.identity {
            format!("{} IDENTITY(1,1)", column.data_type)
        } else {
            column.data_type.to_string()
        }
    }

    fn sort_key_clause(&self, column: &str) -> Option<String> {
        Some(format!("SORTKEY({})", column))
    }

    fn epoch_ms_to_timestamp(&self, expr: &str) -> String {
        // BIGINT / INTEGER is integer division in Redshift
        format!("TIMESTAMP 'epoch' + ({} / 1000) * INTERVAL '1 second'", expr)
    }

    fn weekday_name(&self, expr: &str) -> String {
        format!("TO_CHAR({}, 'Day')", expr)
    }

    fn copy_json(&self, table: &str, copy: &JsonCopy<'_>) -> String {
        let mut sql = format!(
            "COPY {}\nFROM {}\nIAM_ROLE {}\n",
            self.quote_table(table),
            quote_literal(copy.from),
            quote_literal(copy.iam_role_arn)
        );
        if let Some(region) = copy.region {
            sql.push_str(&format!("REGION {}\n", quote_literal(region)));
        }
        sql.push_str("TRUNCATECOLUMNS\n");
        let format = match copy.format {
            JsonFormat::Auto => quote_literal("auto"),
            JsonFormat::JsonPaths(path) => quote_literal(path),
        };
        sql.push_str(&format!("FORMAT AS JSON {}", format));
        sql
    }
}

/// DuckDB SQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDbDialect;

impl Dialect for DuckDbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_table(&self, name: &str) -> String {
        quote_ident(name)
    }

    fn column_type(&self, column: &Column) -> String {
        use crate::schema::ColumnType;

        if column.identity {
            return "UUID DEFAULT gen_random_uuid()".to_string();
        }
        match column.data_type {
            // DuckDB ignores CHAR lengths
            ColumnType::Char(_) => "VARCHAR".to_string(),
            other => other.to_string(),
        }
    }

    fn sort_key_clause(&self, _column: &str) -> Option<String> {
        None
    }

    fn epoch_ms_to_timestamp(&self, expr: &str) -> String {
        format!("epoch_ms(({} // 1000) * 1000)", expr)
    }

    fn weekday_name(&self, expr: &str) -> String {
        format!("dayname({})", expr)
    }

    /// DuckDB matches JSON keys to column names and reads credentials from
    /// its secret manager, so the role and any JSONPaths file are not used.
    /// A prefix is read as every `.json` file below it.
    fn copy_json(&self, table: &str, copy: &JsonCopy<'_>) -> String {
        format!(
            "COPY {} FROM {} (FORMAT JSON)",
            self.quote_table(table),
            quote_literal(&json_glob(copy.from))
        )
    }
}

/// Expand a location prefix into a recursive glob over its JSON files.
///
/// Locations that already name a `.json` file or contain a wildcard are
/// kept as they are.
fn json_glob(location: &str) -> String {
    if location.ends_with(".json") || location.contains('*') {
        location.to_string()
    } else {
        format!("{}/**/*.json", location.trim_end_matches('/'))
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
