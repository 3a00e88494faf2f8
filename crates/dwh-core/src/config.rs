//! Configuration types and parsing for dwh.yml

use crate::dialect::DialectKind;
use crate::error::{CoreError, CoreResult};
use crate::newtype_string::define_newtype_string;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable consulted when no target is given on the command line
pub const TARGET_ENV_VAR: &str = "DWH_TARGET";

define_newtype_string! {
    /// Object-store location (`s3://bucket/prefix`) feeding a bulk load.
    pub struct ObjectStorePath: "an s3:// location naming a bucket"
        where |s| s.strip_prefix("s3://").is_some_and(|rest| !rest.is_empty());
}

define_newtype_string! {
    /// ARN of the role the warehouse assumes to read object storage.
    pub struct IamRoleArn: "an ARN (arn:...)"
        where |s| s.starts_with("arn:") && s.len() > "arn:".len();
}

/// Warehouse configuration from dwh.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQL dialect statements are rendered for
    #[serde(default)]
    pub dialect: DialectKind,

    /// Object-store locations of the raw data
    pub s3: S3Config,

    /// Role used by bulk loads
    pub iam_role: IamRoleConfig,

    /// Named target configurations (e.g., test, prod)
    /// Each target can override the dialect, locations and role
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,
}

/// Object-store locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct S3Config {
    /// Prefix holding the JSON event logs
    pub log_data: String,

    /// JSONPaths file mapping log fields to staging columns
    pub log_jsonpath: String,

    /// Prefix holding the JSON song catalog
    pub song_data: String,

    /// Bucket region, when it differs from the cluster's
    #[serde(default)]
    pub region: Option<String>,
}

/// Access role configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IamRoleConfig {
    /// Role ARN
    pub arn: String,
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Dialect override
    #[serde(default)]
    pub dialect: Option<DialectKind>,

    /// Object-store override
    #[serde(default)]
    pub s3: Option<S3Config>,

    /// Role override
    #[serde(default)]
    pub iam_role: Option<IamRoleConfig>,
}

/// Validated inputs of the bulk-load phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySources {
    log_data: ObjectStorePath,
    song_data: ObjectStorePath,
    log_jsonpath: ObjectStorePath,
    iam_role_arn: IamRoleArn,
    region: Option<String>,
}

impl CopySources {
    /// Validate and wrap the four bulk-load inputs.
    ///
    /// Values may carry the surrounding single quotes of a legacy `dwh.cfg`;
    /// they are stripped here and re-added when statements are rendered.
    pub fn new(
        log_data: &str,
        song_data: &str,
        log_jsonpath: &str,
        iam_role_arn: &str,
    ) -> CoreResult<Self> {
        Ok(Self {
            log_data: object_store_path("s3.log_data", log_data)?,
            song_data: object_store_path("s3.song_data", song_data)?,
            log_jsonpath: object_store_path("s3.log_jsonpath", log_jsonpath)?,
            iam_role_arn: iam_role_arn_value(iam_role_arn)?,
            region: None,
        })
    }

    /// Set the bucket region
    pub fn with_region(mut self, region: &str) -> CoreResult<Self> {
        let region = strip_legacy_quotes(region);
        if region.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "s3.region cannot be empty when given".to_string(),
            });
        }
        self.region = Some(region.to_string());
        Ok(self)
    }

    /// Location of the event logs
    pub fn log_data(&self) -> &ObjectStorePath {
        &self.log_data
    }

    /// Location of the song catalog
    pub fn song_data(&self) -> &ObjectStorePath {
        &self.song_data
    }

    /// Location of the log JSONPaths file
    pub fn log_jsonpath(&self) -> &ObjectStorePath {
        &self.log_jsonpath
    }

    /// Role ARN
    pub fn iam_role_arn(&self) -> &IamRoleArn {
        &self.iam_role_arn
    }

    /// Bucket region
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

fn strip_legacy_quotes(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(trimmed)
}

fn object_store_path(field: &str, value: &str) -> CoreResult<ObjectStorePath> {
    let value = strip_legacy_quotes(value);
    ObjectStorePath::try_new(value).ok_or_else(|| CoreError::ConfigInvalid {
        message: format!(
            "{} must be {}, got '{}'",
            field,
            ObjectStorePath::EXPECTED,
            value
        ),
    })
}

fn iam_role_arn_value(value: &str) -> CoreResult<IamRoleArn> {
    let value = strip_legacy_quotes(value);
    IamRoleArn::try_new(value).ok_or_else(|| CoreError::ConfigInvalid {
        message: format!("iam_role.arn must be {}, got '{}'", IamRoleArn::EXPECTED, value),
    })
}

fn sources_from(s3: &S3Config, iam_role: &IamRoleConfig) -> CoreResult<CopySources> {
    let sources = CopySources::new(&s3.log_data, &s3.song_data, &s3.log_jsonpath, &iam_role.arn)?;
    match &s3.region {
        Some(region) => sources.with_region(region),
        None => Ok(sources),
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded warehouse config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a directory containing dwh.yml or dwh.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("dwh.yml");
        let yaml_path = dir.join("dwh.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the base configuration and every target
    fn validate(&self) -> CoreResult<()> {
        sources_from(&self.s3, &self.iam_role)?;
        for name in self.available_targets() {
            self.copy_sources(Some(name))
                .map_err(|e| CoreError::ConfigInvalid {
                    message: format!("target '{}': {}", name, e),
                })?;
        }
        Ok(())
    }

    /// Names of all configured targets, sorted
    pub fn available_targets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get a target configuration by name
    pub fn get_target(&self, name: &str) -> CoreResult<&TargetConfig> {
        self.targets
            .get(name)
            .ok_or_else(|| CoreError::UnknownTarget {
                name: name.to_string(),
                available: if self.targets.is_empty() {
                    "(none)".to_string()
                } else {
                    self.available_targets().join(", ")
                },
            })
    }

    /// Dialect for the given target, falling back to the base dialect
    pub fn get_dialect(&self, target: Option<&str>) -> CoreResult<DialectKind> {
        let Some(name) = target else {
            return Ok(self.dialect);
        };
        Ok(self.get_target(name)?.dialect.unwrap_or(self.dialect))
    }

    /// Bulk-load inputs for the given target, falling back to the base values
    pub fn copy_sources(&self, target: Option<&str>) -> CoreResult<CopySources> {
        let Some(name) = target else {
            return sources_from(&self.s3, &self.iam_role);
        };
        let overrides = self.get_target(name)?;
        let s3 = overrides.s3.as_ref().unwrap_or(&self.s3);
        let iam_role = overrides.iam_role.as_ref().unwrap_or(&self.iam_role);
        sources_from(s3, iam_role)
    }

    /// Resolve the active target from the CLI flag or `DWH_TARGET`
    pub fn resolve_target(cli_target: Option<&str>) -> Option<String> {
        cli_target
            .map(String::from)
            .or_else(|| std::env::var(TARGET_ENV_VAR).ok())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
