//! Configuration types and parsing for dbctl.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "dbctl.yml";

/// Default connector when neither flags nor config choose one
pub const DEFAULT_CONNECTOR: &str = "duckdb";

/// Default scripts directory, relative to the working directory
pub const DEFAULT_SCRIPTS_PATH: &str = "scripts";

/// Settings from dbctl.yml. Every field is optional; command-line flags
/// and environment variables take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Connector name, matched case-insensitively
    #[serde(default)]
    pub connector: Option<String>,

    /// Connector-specific connection string
    #[serde(default)]
    pub connection_string: Option<String>,

    /// Directory containing migration scripts
    #[serde(default)]
    pub scripts_path: Option<String>,

    /// Overrides the acting principal recorded on applied scripts
    #[serde(default)]
    pub applied_by: Option<String>,
}

impl Config {
    /// Load configuration from an explicit file path
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

        Self::parse(&content, path)
    }

    /// Load `dbctl.yml` from a directory, falling back to defaults when absent
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            Ok(Self::default())
        }
    }

    fn parse(content: &str, path: &Path) -> CoreResult<Self> {
        // An empty file deserializes as YAML null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| CoreError::ConfigParseError {
            path: path.display().to_string(),
            source,
        })
    }

    /// Connector name, or the default
    pub fn connector_or_default(&self) -> &str {
        self.connector.as_deref().unwrap_or(DEFAULT_CONNECTOR)
    }

    /// Scripts directory, or the default
    pub fn scripts_path_or_default(&self) -> PathBuf {
        PathBuf::from(self.scripts_path.as_deref().unwrap_or(DEFAULT_SCRIPTS_PATH))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
