//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use dwh_core::{DialectKind, Phase};

/// dwh - build the Sparkify star schema from staged event logs and song metadata
#[derive(Parser, Debug)]
#[command(name = "dwh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory searched for dwh.yml / dwh.yaml
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override target (falls back to DWH_TARGET)
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the rendered statements as a SQL script
    Sql(SqlArgs),

    /// Execute the statements against a local DuckDB database
    Run(RunArgs),

    /// Describe the warehouse tables
    Tables(TablesArgs),

    /// Validate configuration
    Validate(ValidateArgs),
}

/// Pipeline phase selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseArg {
    /// DROP TABLE IF EXISTS
    Drop,
    /// CREATE TABLE IF NOT EXISTS
    Create,
    /// Bulk loads into staging
    Copy,
    /// INSERT ... SELECT into fact and dimensions
    Insert,
    /// Every phase in order
    All,
}

impl PhaseArg {
    /// Phases selected by this argument
    pub fn phases(self) -> Vec<Phase> {
        match self {
            PhaseArg::Drop => vec![Phase::Drop],
            PhaseArg::Create => vec![Phase::Create],
            PhaseArg::Copy => vec![Phase::Copy],
            PhaseArg::Insert => vec![Phase::Insert],
            PhaseArg::All => Phase::ALL.to_vec(),
        }
    }
}

/// Dialect override
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectArg {
    /// Amazon Redshift
    Redshift,
    /// DuckDB
    Duckdb,
}

impl From<DialectArg> for DialectKind {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Redshift => DialectKind::Redshift,
            DialectArg::Duckdb => DialectKind::DuckDb,
        }
    }
}

/// Arguments for the sql command
#[derive(Args, Debug)]
pub struct SqlArgs {
    /// Phase to render
    #[arg(long, value_enum, default_value = "all")]
    pub phase: PhaseArg,

    /// Override SQL dialect
    #[arg(short, long, value_enum)]
    pub dialect: Option<DialectArg>,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Phase to execute
    #[arg(long, value_enum, default_value = "all")]
    pub phase: PhaseArg,

    /// DuckDB database file (":memory:" for a throwaway database)
    #[arg(long, default_value = "dwh.duckdb")]
    pub database: String,
}

/// Arguments for the tables command
#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: TablesOutput,
}

/// Tables output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablesOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also check every configured target
    #[arg(long)]
    pub all_targets: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
