//! Run command implementation

use anyhow::{Context, Result};
use dwh_core::DialectKind;
use dwh_db::{Database, DuckDbBackend};
use std::time::Instant;

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::RenderContext;

/// Execute the run command
///
/// Statements are always rendered for DuckDB here, whatever the configured
/// dialect, since that is the engine they run against.
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let phases = args.phase.phases();
    let context = RenderContext::resolve(global, &phases, Some(DialectKind::DuckDb))?;
    let pipeline = context.pipeline(&phases);

    let db = DuckDbBackend::new(&args.database)
        .with_context(|| format!("Failed to open database {}", args.database))?;

    let start = Instant::now();
    let mut executed = 0;
    for phase in pipeline.phases() {
        let statements = pipeline.phase(phase);
        let phase_start = Instant::now();
        let rows = db
            .execute_statements(statements)
            .await
            .with_context(|| format!("The {} phase failed", phase))?;
        executed += statements.len();
        println!(
            "  ✓ {} ({} statements, {} rows) [{}ms]",
            phase,
            statements.len(),
            rows,
            phase_start.elapsed().as_millis()
        );
    }

    println!(
        "\nExecuted {} statements against {} in {}ms",
        executed,
        args.database,
        start.elapsed().as_millis()
    );
    Ok(())
}
