//! Reconciles the change log into the database's current version.
//!
//! The log is append-only and is re-read on every call. A forward entry is
//! effective unless a backward entry with the same version cancels it; the
//! current version is the highest effective forward version.

use crate::connection::DatabaseConnection;
use crate::error::{MigrateError, MigrateResult};
use dbctl_core::{ChangeLogEntry, MigrationDirection, SemanticVersion};
use std::collections::BTreeMap;

/// Computes the current effective version of a database
pub struct VersionResolver {
    connection: DatabaseConnection,
}

impl VersionResolver {
    pub fn new(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Fetch the change log and reconcile it
    pub async fn get_current_version(&self) -> MigrateResult<SemanticVersion> {
        log::debug!(
            "Calculating the current version of the database {}",
            self.connection
        );

        let entries = self
            .connection
            .connector()
            .fetch_change_log_entries(self.connection.connection_string())
            .await?;
        log::debug!("Found {} changes applied to the database", entries.len());

        let version = current_version(&entries)?;
        log::debug!("Last applied script version is {}", version);
        Ok(version)
    }
}

/// Forward entries not cancelled by a backward entry, ascending by version.
///
/// Each backward entry cancels one forward application of its version, so a
/// version that was rolled back and then applied again is effective. When a
/// version was applied more than once, the most recent entry represents it.
pub fn effective_forward_entries(entries: &[ChangeLogEntry]) -> Vec<&ChangeLogEntry> {
    let mut applications: BTreeMap<SemanticVersion, (i64, Option<&ChangeLogEntry>)> =
        BTreeMap::new();
    let (mut forward_count, mut backward_count) = (0, 0);

    for entry in entries {
        let (balance, latest) = applications.entry(entry.version()).or_insert((0, None));
        match entry.direction() {
            MigrationDirection::Forward => {
                forward_count += 1;
                *balance += 1;
                if latest.map_or(true, |l| entry.change_date_time() >= l.change_date_time()) {
                    *latest = Some(entry);
                }
            }
            MigrationDirection::Backward => {
                backward_count += 1;
                *balance -= 1;
            }
        }
    }

    log::debug!(
        "Found {} forward migrations and {} backward migrations applied to the database",
        forward_count,
        backward_count
    );

    applications
        .into_iter()
        .filter_map(|(version, (balance, latest))| {
            let latest = latest?;
            if balance > 0 {
                log::debug!("Forward migration {} is still effective", version);
                Some(latest)
            } else {
                log::debug!("Forward migration {} was undone", version);
                None
            }
        })
        .collect()
}

/// Highest effective forward version in `entries`
pub fn current_version(entries: &[ChangeLogEntry]) -> MigrateResult<SemanticVersion> {
    if entries.is_empty() {
        return Err(MigrateError::NoChangeLogFound);
    }

    effective_forward_entries(entries)
        .last()
        .map(|e| e.version())
        .ok_or(MigrateError::NoEffectiveVersion)
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
