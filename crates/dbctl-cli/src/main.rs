//! dbctl CLI - versioned schema migrations against a change-logged database

use anyhow::Result;
use clap::Parser;
use dbctl_migrate::MigrateError;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{history, init, migrate, version};

/// Conventional exit status for a run interrupted by Ctrl-C
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    match run(&cli, &cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            if is_cancelled(&err) {
                ExitCode::from(EXIT_CANCELLED)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: &Cli, cancel: &CancellationToken) -> Result<()> {
    match &cli.command {
        cli::Commands::Init => init::execute(&cli.global, cancel).await,
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global, cancel).await,
        cli::Commands::Version => version::execute(&cli.global).await,
        cli::Commands::History(args) => history::execute(args, &cli.global).await,
    }
}

/// RUST_LOG, when set, overrides the level chosen by --verbose
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Cancel at the next script boundary when the user presses Ctrl-C
fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, stopping after the current script");
            cancel.cancel();
        }
    });
}

fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<MigrateError>(),
            Some(MigrateError::Cancelled { .. })
        )
    })
}
