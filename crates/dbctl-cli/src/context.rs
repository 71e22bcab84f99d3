//! Runtime context for CLI commands

use anyhow::{anyhow, Context, Result};
use dbctl_core::{current_principal, Config};
use dbctl_db::ConnectorRegistry;
use dbctl_migrate::DatabaseConnection;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Loaded configuration and the resolved database connection.
///
/// Settings come from command-line flags (or their environment variables)
/// first, then dbctl.yml, then built-in defaults.
pub(crate) struct RuntimeContext {
    pub config: Config,
    pub connection: DatabaseConnection,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(global: &GlobalArgs) -> Result<Self> {
        Self::with_registry(global, &ConnectorRegistry::builtin())
    }

    pub fn with_registry(global: &GlobalArgs, registry: &ConnectorRegistry) -> Result<Self> {
        let config = load_config(global)?;

        let connector_name = global
            .connector
            .as_deref()
            .unwrap_or_else(|| config.connector_or_default());
        let connector = registry
            .resolve(connector_name)
            .context("Failed to select a database connector")?;

        let connection_string = global
            .connection_string
            .as_deref()
            .or(config.connection_string.as_deref())
            .ok_or_else(|| {
                anyhow!(
                    "No connection string given. Pass --connection-string, set DBCTL_CONNECTION_STRING, \
                     or add connection_string to dbctl.yml"
                )
            })?
            .to_string();

        Ok(Self {
            connection: DatabaseConnection::new(connector, connection_string),
            config,
        })
    }

    /// Scripts directory from the flag, the config file, or the default
    pub fn scripts_path(&self, flag: Option<&str>) -> PathBuf {
        flag.map(PathBuf::from)
            .unwrap_or_else(|| self.config.scripts_path_or_default())
    }

    /// Principal recorded on applied scripts
    pub fn applied_by(&self) -> String {
        self.config
            .applied_by
            .clone()
            .unwrap_or_else(current_principal)
    }
}

fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => {
            Config::load(Path::new(path)).context("Failed to load configuration file")
        }
        None => Config::load_from_dir(Path::new(".")).context("Failed to load dbctl.yml"),
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
