//! Init command implementation

use anyhow::{Context, Result};
use dbctl_migrate::{InitializeCommand, Invoker};
use tokio_util::sync::CancellationToken;

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

/// Execute the init command
pub(crate) async fn execute(global: &GlobalArgs, cancel: &CancellationToken) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let command = InitializeCommand::new(ctx.connection.clone());

    Invoker::new()
        .execute(&command, cancel)
        .await
        .context("Failed to initialize the database")
}
