//! dbctl-core - Core library for dbctl
//!
//! This crate provides the shared vocabulary of the migration runner:
//! semantic versions, migration directions, script filename parsing,
//! change log entries, and the YAML configuration file.

pub mod change_log;
pub mod checksum;
pub mod clock;
pub mod config;
pub mod direction;
pub mod error;
pub mod filename;
pub mod version;

pub use change_log::ChangeLogEntry;
pub use checksum::compute_checksum;
pub use clock::{current_principal, Clock, FixedClock, SystemClock};
pub use config::Config;
pub use direction::MigrationDirection;
pub use error::{CoreError, CoreResult};
pub use filename::ScriptFilename;
pub use version::SemanticVersion;
