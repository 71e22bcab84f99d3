//! Initialize: create the change log and record the genesis entry

use super::Command;
use crate::connection::DatabaseConnection;
use crate::error::{MigrateError, MigrateResult};
use async_trait::async_trait;
use dbctl_core::{ChangeLogEntry, Clock, SystemClock};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Filename recorded for the genesis entry
pub const GENESIS_SCRIPT: &str = "f-1.0.0-Initialize_database_change_log.ddl";

/// Principal recorded for the genesis entry
pub const GENESIS_PRINCIPAL: &str = "DbCtl";

/// Creates the change log table and marks the database as version 1.0.0.
///
/// Running it against an initialized database fails in the connector.
pub struct InitializeCommand {
    connection: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl InitializeCommand {
    pub fn new(connection: DatabaseConnection) -> Self {
        Self::with_clock(connection, Arc::new(SystemClock))
    }

    pub fn with_clock(connection: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        log::debug!("Creating initialize command with {}", connection);
        Self { connection, clock }
    }
}

#[async_trait]
impl Command for InitializeCommand {
    fn name(&self) -> &'static str {
        "initialize"
    }

    async fn execute(&self, cancel: &CancellationToken) -> MigrateResult<()> {
        if cancel.is_cancelled() {
            return Err(MigrateError::Cancelled { applied: 0 });
        }

        log::info!("Initializing the database {}", self.connection);

        let entry =
            ChangeLogEntry::new(GENESIS_SCRIPT, GENESIS_PRINCIPAL, self.clock.now(), &[])?;
        let connector = self.connection.connector();
        let connection_string = self.connection.connection_string();

        connector.create_change_log_table(connection_string).await?;
        connector
            .add_change_log_entry(connection_string, &entry)
            .await?;

        log::info!("Completed initializing the database");
        Ok(())
    }
}
