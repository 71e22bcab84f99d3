//! dbctl-db - Connector layer for dbctl
//!
//! This crate provides the `Connector` capability trait consumed by the
//! migration engine, a name-based `ConnectorRegistry`, and the DuckDB
//! implementation.

pub mod duckdb;
pub mod error;
#[cfg(feature = "test-support")]
pub mod memory;
pub mod registry;
pub mod traits;

pub use duckdb::DuckDbConnector;
pub use error::{DbError, DbResult};
#[cfg(feature = "test-support")]
pub use memory::MemoryConnector;
pub use registry::{ConnectorMetadata, ConnectorRegistry};
pub use traits::Connector;
