//! Migrate: apply the missing forward scripts, or roll back the current version

use super::Command;
use crate::catalog::ScriptCatalog;
use crate::connection::DatabaseConnection;
use crate::error::{MigrateError, MigrateResult};
use crate::resolver::VersionResolver;
use async_trait::async_trait;
use dbctl_core::{MigrationDirection, SemanticVersion};
use tokio_util::sync::CancellationToken;

/// Outcome of a successful migrate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub direction: MigrationDirection,
    /// Effective version before any script ran
    pub starting_version: SemanticVersion,
    /// Scripts executed and recorded, in order
    pub applied: Vec<String>,
}

/// Brings the database up to date in the catalog's direction.
///
/// Scripts run strictly one after another: a script's change log entry is
/// recorded before the next script starts. There is no compensation when a
/// later script fails; the recorded prefix stays applied and the next run
/// resumes from it.
pub struct MigrateCommand {
    connection: DatabaseConnection,
    catalog: ScriptCatalog,
    resolver: VersionResolver,
}

impl MigrateCommand {
    pub fn new(connection: DatabaseConnection, catalog: ScriptCatalog) -> Self {
        log::debug!(
            "Creating {} migrate command with {}",
            catalog.direction(),
            connection
        );
        let resolver = VersionResolver::new(connection.clone());
        Self {
            connection,
            catalog,
            resolver,
        }
    }

    pub fn direction(&self) -> MigrationDirection {
        self.catalog.direction()
    }

    /// Run the migration and report what was applied
    pub async fn run(&self, cancel: &CancellationToken) -> MigrateResult<MigrationReport> {
        let starting_version = self.resolver.get_current_version().await?;
        if self.direction() == MigrationDirection::Backward
            && starting_version == SemanticVersion::GENESIS
        {
            return Err(MigrateError::GenesisRollback);
        }

        let scripts = self.catalog.find_scripts(starting_version)?;

        let mut report = MigrationReport {
            direction: self.direction(),
            starting_version,
            applied: Vec::with_capacity(scripts.len()),
        };

        if scripts.is_empty() {
            log::info!(
                "No {} scripts found to execute against the database at version {}",
                report.direction,
                starting_version
            );
            return Ok(report);
        }

        let connector = self.connection.connector();
        let connection_string = self.connection.connection_string();

        for script in scripts {
            if cancel.is_cancelled() {
                log::warn!(
                    "Cancellation requested; stopping before {} after {} script(s)",
                    script,
                    report.applied.len()
                );
                return Err(MigrateError::Cancelled {
                    applied: report.applied.len(),
                });
            }

            log::info!("Executing script {}", script);

            let (entry, contents) = self.catalog.get_script(&script)?;
            connector.execute_script(connection_string, &contents).await?;
            connector
                .add_change_log_entry(connection_string, &entry)
                .await?;

            report.applied.push(script);
        }

        Ok(report)
    }
}

#[async_trait]
impl Command for MigrateCommand {
    fn name(&self) -> &'static str {
        "migrate"
    }

    async fn execute(&self, cancel: &CancellationToken) -> MigrateResult<()> {
        let report = self.run(cancel).await?;
        if !report.applied.is_empty() {
            log::info!("Done executing {} scripts", report.applied.len());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
