//! Error types for dbctl-migrate

use dbctl_core::{CoreError, SemanticVersion};
use dbctl_db::DbError;
use thiserror::Error;

/// Migration engine errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Scripts directory does not exist (M001)
    #[error("[M001] Failed to find path {path}")]
    PathNotFound { path: String },

    /// A selected script vanished before it could be read (M002)
    #[error("[M002] Failed to find script file {filename} in {path}")]
    ScriptNotFound { filename: String, path: String },

    /// The database has no change log (M003)
    #[error("[M003] Failed to find any change log entries in the database. Was the database initialized with `dbctl init`?")]
    NoChangeLogFound,

    /// Every forward entry has been rolled back (M004)
    #[error("[M004] No effective forward migration remains in the change log; the {} baseline must never be rolled back", SemanticVersion::GENESIS)]
    NoEffectiveVersion,

    /// More than one backward script targets the same version (M005)
    #[error("[M005] Found more than one backward script for version {version}: {files}")]
    DuplicateBackwardScript {
        version: SemanticVersion,
        files: String,
    },

    /// Cancellation observed between scripts (M006)
    #[error("[M006] Migration cancelled after applying {applied} script(s)")]
    Cancelled { applied: usize },

    /// Filesystem error while listing or reading scripts (M007)
    #[error("[M007] Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Backward run requested while only the genesis version is effective (M008)
    #[error("[M008] Refusing to roll back the {} baseline recorded by `dbctl init`", SemanticVersion::GENESIS)]
    GenesisRollback,

    /// Malformed script filename or other core failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Connector failure, passed through untouched
    #[error(transparent)]
    Connector(#[from] DbError),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
