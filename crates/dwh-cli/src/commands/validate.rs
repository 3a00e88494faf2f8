//! Validate command implementation

use anyhow::{bail, Result};
use dwh_core::Config;

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::common::{load_config, resolve_target};

/// Execute the validate command
pub async fn execute(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    println!("Validating configuration...\n");

    let config = load_config(global)?;
    let target = resolve_target(global);

    let mut failures = 0;
    let names: Vec<Option<&str>> = if args.all_targets {
        std::iter::once(None)
            .chain(config.available_targets().into_iter().map(Some))
            .collect()
    } else {
        vec![target.as_deref()]
    };

    for name in names {
        match check_target(&config, name) {
            Ok(summary) => println!("  ✓ {}: {}", name.unwrap_or("(base)"), summary),
            Err(e) => {
                failures += 1;
                println!("  ✗ {}: {}", name.unwrap_or("(base)"), e);
            }
        }
    }

    if failures > 0 {
        bail!("{} target(s) failed validation", failures);
    }
    println!("\nConfiguration is valid");
    Ok(())
}

/// Resolve a target and describe what it would load
fn check_target(config: &Config, target: Option<&str>) -> Result<String> {
    let dialect = config.get_dialect(target)?;
    let sources = config.copy_sources(target)?;
    let region = sources
        .region()
        .map(|r| format!(" ({})", r))
        .unwrap_or_default();
    Ok(format!(
        "{} loading {} and {}{}",
        dialect,
        sources.log_data(),
        sources.song_data(),
        region
    ))
}
