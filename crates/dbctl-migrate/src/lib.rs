//! dbctl-migrate - Migration engine for dbctl
//!
//! Resolves the database's current effective version from its change log,
//! selects the scripts that move it forward (or the one script that rolls
//! the current version back), and applies them in order, recording each one.

pub mod catalog;
pub mod command;
pub mod connection;
pub mod error;
pub mod fs;
pub mod invoker;
pub mod resolver;

pub use catalog::ScriptCatalog;
pub use command::{Command, InitializeCommand, MigrateCommand, MigrationReport};
pub use connection::DatabaseConnection;
pub use error::{MigrateError, MigrateResult};
pub use fs::{LocalFileSystem, ScriptFileSystem};
pub use invoker::Invoker;
pub use resolver::VersionResolver;
