//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use dwh_core::{Config, CopySources, DialectKind, Phase, Pipeline, StatementBuilder};
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load configuration from `--config` or the project directory
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path)),
        None => Config::load_from_dir(Path::new(&global.project_dir))
            .context("Failed to load config"),
    }
}

/// Load configuration when one is available.
///
/// An explicit `--config` must exist; without one, a missing dwh.yml in the
/// project directory yields `None`.
pub(crate) fn try_load_config(global: &GlobalArgs) -> Result<Option<Config>> {
    if global.config.is_some() {
        return load_config(global).map(Some);
    }
    let dir = Path::new(&global.project_dir);
    if dir.join("dwh.yml").exists() || dir.join("dwh.yaml").exists() {
        load_config(global).map(Some)
    } else {
        log::debug!("No dwh.yml in {}, using defaults", dir.display());
        Ok(None)
    }
}

/// Active target from `--target` or `DWH_TARGET`
pub(crate) fn resolve_target(global: &GlobalArgs) -> Option<String> {
    Config::resolve_target(global.target.as_deref())
}

/// Everything needed to render a pipeline
pub(crate) struct RenderContext {
    pub(crate) dialect: DialectKind,
    pub(crate) sources: Option<CopySources>,
}

impl RenderContext {
    /// Resolve dialect and bulk-load sources for the selected phases.
    ///
    /// `dialect` overrides whatever the configuration selects. Phases that
    /// need sources fail without a configuration.
    pub(crate) fn resolve(
        global: &GlobalArgs,
        phases: &[Phase],
        dialect: Option<DialectKind>,
    ) -> Result<Self> {
        let config = try_load_config(global)?;
        let target = resolve_target(global);

        let Some(config) = config else {
            if phases.iter().any(|p| p.needs_copy_sources()) {
                bail!(
                    "The {} phase needs dwh.yml (object-store locations and IAM role); pass --config or run from the project directory",
                    Phase::Copy
                );
            }
            if target.is_some() {
                log::warn!("Ignoring target: no configuration loaded");
            }
            return Ok(Self {
                dialect: dialect.unwrap_or_default(),
                sources: None,
            });
        };

        let dialect = match dialect {
            Some(d) => d,
            None => config.get_dialect(target.as_deref())?,
        };
        let sources = config
            .copy_sources(target.as_deref())
            .context("Invalid bulk-load configuration")?;
        if let Some(name) = &target {
            log::info!("Using target '{}' ({})", name, dialect);
        }

        Ok(Self {
            dialect,
            sources: Some(sources),
        })
    }

    /// Build the pipeline for the selected phases
    pub(crate) fn pipeline(&self, phases: &[Phase]) -> Pipeline {
        let builder = StatementBuilder::new(self.dialect);
        Pipeline::from_phases(&builder, phases, self.sources.as_ref())
    }
}
