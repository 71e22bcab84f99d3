//! Version command implementation

use anyhow::{Context, Result};
use dbctl_migrate::VersionResolver;

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

/// Execute the version command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let version = VersionResolver::new(ctx.connection.clone())
        .get_current_version()
        .await
        .context("Failed to determine the database version")?;

    println!("{version}");
    Ok(())
}
