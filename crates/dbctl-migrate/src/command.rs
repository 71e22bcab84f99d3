//! Commands run by the [`Invoker`](crate::Invoker).
//!
//! Each command is bound to one [`DatabaseConnection`](crate::DatabaseConnection)
//! and is meant to be executed once.

pub mod initialize;
pub mod migrate;

pub use initialize::InitializeCommand;
pub use migrate::{MigrateCommand, MigrationReport};

use crate::error::MigrateResult;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// A unit of work against the database
#[async_trait]
pub trait Command: Send + Sync {
    /// Command name for logging
    fn name(&self) -> &'static str;

    /// Run the command. Cancellation is only observed between whole steps.
    async fn execute(&self, cancel: &CancellationToken) -> MigrateResult<()>;
}
