//! Migrate command implementation

use anyhow::{Context, Result};
use dbctl_core::MigrationDirection;
use dbctl_migrate::{Invoker, MigrateCommand, ScriptCatalog};
use tokio_util::sync::CancellationToken;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::context::RuntimeContext;

/// Execute the migrate command
pub(crate) async fn execute(
    args: &MigrateArgs,
    global: &GlobalArgs,
    cancel: &CancellationToken,
) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let direction = if args.backward {
        MigrationDirection::Backward
    } else {
        MigrationDirection::Forward
    };
    let scripts_path = ctx.scripts_path(args.scripts.as_deref());
    log::debug!("Using scripts from {}", scripts_path.display());

    let catalog = ScriptCatalog::new(scripts_path, direction, ctx.applied_by());
    let command = MigrateCommand::new(ctx.connection.clone(), catalog);

    Invoker::new()
        .execute(&command, cancel)
        .await
        .with_context(|| format!("Failed to migrate the database {direction}"))
}
