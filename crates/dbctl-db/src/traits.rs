//! Connector capability trait

use crate::error::DbResult;
use async_trait::async_trait;
use dbctl_core::ChangeLogEntry;

/// The narrow set of database operations the migration engine needs.
///
/// Every call receives the connection string so a single connector instance
/// can serve several databases. Implementations must be Send + Sync for
/// async operation.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Create the change log table. Not idempotent: a second call may fail.
    async fn create_change_log_table(&self, connection_string: &str) -> DbResult<usize>;

    /// Fetch every recorded entry, in no particular order
    async fn fetch_change_log_entries(
        &self,
        connection_string: &str,
    ) -> DbResult<Vec<ChangeLogEntry>>;

    /// Append one entry verbatim
    async fn add_change_log_entry(
        &self,
        connection_string: &str,
        entry: &ChangeLogEntry,
    ) -> DbResult<usize>;

    /// Run arbitrary script text
    async fn execute_script(&self, connection_string: &str, script: &str) -> DbResult<usize>;

    /// Connector identifier for logging
    fn name(&self) -> &'static str;
}
