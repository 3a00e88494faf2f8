//! Sql command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, SqlArgs};
use crate::commands::common::RenderContext;

/// Execute the sql command
pub async fn execute(args: &SqlArgs, global: &GlobalArgs) -> Result<()> {
    let phases = args.phase.phases();
    let context = RenderContext::resolve(global, &phases, args.dialect.map(Into::into))?;
    let pipeline = context.pipeline(&phases);

    log::info!(
        "Rendered {} statements for {}",
        pipeline.len(),
        context.dialect
    );
    print!("{}", pipeline.to_script());
    Ok(())
}
