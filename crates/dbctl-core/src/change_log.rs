//! Change log entries recorded in the target database

use crate::checksum::compute_checksum;
use crate::direction::MigrationDirection;
use crate::error::CoreResult;
use crate::filename::{bare_filename, ScriptFilename};
use crate::version::SemanticVersion;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One applied script, as persisted by a connector.
///
/// `version`, `description`, and `direction` are always derived from
/// `filename`; there is no way to construct an entry where they disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeLogEntry {
    filename: String,
    applied_by: String,
    change_date_time: DateTime<Utc>,
    content_hash: String,
    version: SemanticVersion,
    description: String,
    direction: MigrationDirection,
}

impl ChangeLogEntry {
    /// Build an entry for a script about to be applied, hashing its raw bytes
    pub fn new(
        filename: &str,
        applied_by: &str,
        change_date_time: DateTime<Utc>,
        content: &[u8],
    ) -> CoreResult<Self> {
        Self::restore(
            filename,
            applied_by,
            change_date_time,
            &compute_checksum(content),
        )
    }

    /// Rebuild an entry read back from storage, where the hash is already known
    pub fn restore(
        filename: &str,
        applied_by: &str,
        change_date_time: DateTime<Utc>,
        content_hash: &str,
    ) -> CoreResult<Self> {
        let parsed = ScriptFilename::parse(filename)?;
        Ok(Self {
            filename: bare_filename(filename).to_string(),
            applied_by: applied_by.to_string(),
            change_date_time,
            content_hash: content_hash.to_string(),
            version: parsed.version,
            description: parsed.description,
            direction: parsed.direction,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn applied_by(&self) -> &str {
        &self.applied_by
    }

    pub fn change_date_time(&self) -> DateTime<Utc> {
        self.change_date_time
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn version(&self) -> SemanticVersion {
        self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn direction(&self) -> MigrationDirection {
        self.direction
    }
}
