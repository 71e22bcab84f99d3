//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// dbctl - versioned schema migrations recorded in a database change log
#[derive(Parser, Debug)]
#[command(name = "dbctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: ./dbctl.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Connector name, e.g. duckdb
    #[arg(long, global = true, env = "DBCTL_CONNECTOR")]
    pub connector: Option<String>,

    /// Connector-specific connection string
    #[arg(long, global = true, env = "DBCTL_CONNECTION_STRING")]
    pub connection_string: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the change log and record version 1.0.0
    Init,

    /// Apply missing forward scripts, or roll back the current version
    Migrate(MigrateArgs),

    /// Print the current effective database version
    Version,

    /// Print the recorded change log
    History(HistoryArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Directory containing migration scripts
    #[arg(short, long, env = "DBCTL_SCRIPTS")]
    pub scripts: Option<String>,

    /// Run the backward script for the current version instead of migrating forward
    #[arg(short, long)]
    pub backward: bool,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: HistoryOutput,
}

/// History output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutput {
    /// Aligned text table
    Table,
    /// JSON array
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
