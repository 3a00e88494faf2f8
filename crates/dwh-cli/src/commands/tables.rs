//! Tables command implementation

use anyhow::Result;
use dwh_core::catalog::ALL_TABLES;
use dwh_core::{TableDef, TableKind};
use serde::Serialize;

use crate::cli::{GlobalArgs, TablesArgs, TablesOutput};

/// Execute the tables command
pub async fn execute(args: &TablesArgs, _global: &GlobalArgs) -> Result<()> {
    let tables: Vec<TableInfo> = ALL_TABLES.iter().map(|t| TableInfo::from(*t)).collect();

    match args.output {
        TablesOutput::Table => print_table(&tables),
        TablesOutput::Json => println!("{}", serde_json::to_string_pretty(&tables)?),
    }
    Ok(())
}

/// Table information for display
#[derive(Debug, Serialize)]
struct TableInfo {
    name: &'static str,
    kind: TableKind,
    primary_key: Option<&'static str>,
    sort_key: Option<&'static str>,
    columns: Vec<ColumnInfo>,
}

#[derive(Debug, Serialize)]
struct ColumnInfo {
    name: &'static str,
    #[serde(rename = "type")]
    data_type: String,
    not_null: bool,
    generated: bool,
}

impl From<&TableDef> for TableInfo {
    fn from(table: &TableDef) -> Self {
        Self {
            name: table.name,
            kind: table.kind,
            primary_key: table.primary_key().map(|c| c.name),
            sort_key: table.sort_key,
            columns: table
                .columns
                .iter()
                .map(|c| ColumnInfo {
                    name: c.name,
                    data_type: c.data_type.to_string(),
                    not_null: c.not_null || c.primary_key,
                    generated: c.identity,
                })
                .collect(),
        }
    }
}

/// Print tables in table format
fn print_table(tables: &[TableInfo]) {
    let name_width = tables.iter().map(|t| t.name.len()).max().unwrap_or(4).max(4);
    let kind_width = 9;
    let key_width = tables
        .iter()
        .map(|t| t.primary_key.map_or(1, str::len))
        .max()
        .unwrap_or(11)
        .max(11);

    println!(
        "{:<name_width$}  {:<kind_width$}  {:<key_width$}  {:<10}  COLUMNS",
        "NAME", "KIND", "PRIMARY_KEY", "SORT_KEY",
    );
    println!(
        "{:-<name_width$}  {:-<kind_width$}  {:-<key_width$}  {:-<10}  {}",
        "",
        "",
        "",
        "",
        "-".repeat(40),
    );

    for table in tables {
        let columns: Vec<&str> = table.columns.iter().map(|c| c.name).collect();
        println!(
            "{:<name_width$}  {:<kind_width$}  {:<key_width$}  {:<10}  {}",
            table.name,
            table.kind.to_string(),
            table.primary_key.unwrap_or("-"),
            table.sort_key.unwrap_or("-"),
            columns.join(", "),
        );
    }

    let staging = tables.iter().filter(|t| t.kind == TableKind::Staging).count();
    println!(
        "\n{} tables ({} staging, {} star schema)",
        tables.len(),
        staging,
        tables.len() - staging
    );
}
