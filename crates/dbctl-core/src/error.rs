//! Error types for dbctl-core

use thiserror::Error;

/// Core error type for dbctl
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Script filename does not follow `<d>-<major>.<minor>.<patch>-<description>.<ext>`
    #[error("[C001] Malformed script filename '{filename}': {reason}")]
    MalformedFilename { filename: String, reason: String },

    /// C002: Version string is not `major.minor.patch`
    #[error("[C002] Invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    /// C003: Configuration file not found
    #[error("[C003] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C004: Failed to parse configuration file
    #[error("[C004] Failed to parse config {path}: {source}")]
    ConfigParseError {
        path: String,
        source: serde_yaml::Error,
    },

    /// C005: IO error with file path context
    #[error("[C005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
