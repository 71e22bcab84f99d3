//! Single entry point for running commands

use crate::command::Command;
use crate::error::MigrateResult;
use tokio_util::sync::CancellationToken;

/// Runs one command under one cancellation token
#[derive(Debug, Default, Clone, Copy)]
pub struct Invoker;

impl Invoker {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        command: &dyn Command,
        cancel: &CancellationToken,
    ) -> MigrateResult<()> {
        log::info!("Executing {}", command.name());

        let result = command.execute(cancel).await;
        match &result {
            Ok(()) => log::debug!("{} completed", command.name()),
            Err(e) => log::debug!("{} failed: {}", command.name(), e),
        }
        result
    }
}
