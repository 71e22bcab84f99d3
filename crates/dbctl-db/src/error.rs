//! Error types for dbctl-db

use thiserror::Error;

/// Connector errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Script or statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Change log table already exists (D003)
    #[error("[D003] Change log table already exists in {0}. Was the database already initialized?")]
    ChangeLogTableExists(String),

    /// No registered connector matches the requested name (D004)
    #[error("[D004] Failed to find the {name} connector implementation (available: {available})")]
    ConnectorNotFound { name: String, available: String },

    /// A stored change log row cannot be turned back into an entry (D005)
    #[error("[D005] Corrupt change log entry '{filename}': {reason}")]
    CorruptEntry { filename: String, reason: String },

    /// Mutex poisoned (D006)
    #[error("[D006] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
