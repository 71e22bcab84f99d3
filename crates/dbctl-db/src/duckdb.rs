//! DuckDB connector implementation

use crate::error::{DbError, DbResult};
use crate::traits::Connector;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use dbctl_core::ChangeLogEntry;
use duckdb::Connection;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Table holding the change log
pub const CHANGE_LOG_TABLE: &str = "dbctl_change_log";

/// DuckDB connector.
///
/// Connections are opened lazily and cached per connection string, so
/// `:memory:` databases survive across calls on the same connector.
#[derive(Default)]
pub struct DuckDbConnector {
    connections: Mutex<HashMap<String, Connection>>,
}

impl DuckDbConnector {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(connection_string: &str) -> DbResult<Connection> {
        let conn = if connection_string == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(Path::new(connection_string))
        };
        conn.map_err(|e| DbError::ConnectionError(format!("{e}: {connection_string}")))
    }

    /// Run `f` against the cached connection for `connection_string`
    fn with_connection<T>(
        &self,
        connection_string: &str,
        f: impl FnOnce(&Connection) -> DbResult<T>,
    ) -> DbResult<T> {
        let mut connections = self
            .connections
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;

        if !connections.contains_key(connection_string) {
            log::debug!("Opening DuckDB database {}", connection_string);
            let conn = Self::open(connection_string)?;
            connections.insert(connection_string.to_string(), conn);
        }

        match connections.get(connection_string) {
            Some(conn) => f(conn),
            None => Err(DbError::ConnectionError(connection_string.to_string())),
        }
    }

    fn change_log_exists(conn: &Connection) -> DbResult<bool> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'main' AND table_name = ?",
                duckdb::params![CHANGE_LOG_TABLE],
                |row| row.get(0),
            )
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count > 0)
    }

    fn read_entries(conn: &Connection) -> DbResult<Vec<ChangeLogEntry>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT filename, applied_by, change_date_time, content_hash, version, direction
             FROM {CHANGE_LOG_TABLE}
             ORDER BY rowid"
        ))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(StoredRow {
                    filename: row.get(0)?,
                    applied_by: row.get(1)?,
                    change_date_time: row.get(2)?,
                    content_hash: row.get(3)?,
                    version: row.get(4)?,
                    direction: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(StoredRow::into_entry).collect()
    }
}

/// A change log row as stored, before validation
struct StoredRow {
    filename: String,
    applied_by: String,
    change_date_time: String,
    content_hash: String,
    version: String,
    direction: String,
}

impl StoredRow {
    fn into_entry(self) -> DbResult<ChangeLogEntry> {
        let corrupt = |reason: String| DbError::CorruptEntry {
            filename: self.filename.clone(),
            reason,
        };

        let changed_at = DateTime::parse_from_rfc3339(&self.change_date_time)
            .map_err(|e| corrupt(format!("bad timestamp '{}': {e}", self.change_date_time)))?
            .with_timezone(&Utc);

        let entry = ChangeLogEntry::restore(
            &self.filename,
            &self.applied_by,
            changed_at,
            &self.content_hash,
        )
        .map_err(|e| corrupt(e.to_string()))?;

        if entry.version().to_string() != self.version
            || entry.direction().as_str() != self.direction
        {
            return Err(corrupt(format!(
                "stored {} {} does not match the filename",
                self.direction, self.version
            )));
        }

        Ok(entry)
    }
}

#[async_trait]
impl Connector for DuckDbConnector {
    async fn create_change_log_table(&self, connection_string: &str) -> DbResult<usize> {
        self.with_connection(connection_string, |conn| {
            if Self::change_log_exists(conn)? {
                return Err(DbError::ChangeLogTableExists(connection_string.to_string()));
            }
            conn.execute_batch(&format!(
                "CREATE TABLE {CHANGE_LOG_TABLE} (
                     filename         VARCHAR NOT NULL,
                     applied_by       VARCHAR NOT NULL,
                     change_date_time VARCHAR NOT NULL,
                     content_hash     VARCHAR NOT NULL,
                     version          VARCHAR NOT NULL,
                     direction        VARCHAR NOT NULL,
                     description      VARCHAR NOT NULL
                 );"
            ))
            .map_err(|e| DbError::ExecutionError(format!("failed to create change log: {e}")))?;
            Ok(0)
        })
    }

    async fn fetch_change_log_entries(
        &self,
        connection_string: &str,
    ) -> DbResult<Vec<ChangeLogEntry>> {
        self.with_connection(connection_string, |conn| {
            if !Self::change_log_exists(conn)? {
                log::debug!("No {} table in {}", CHANGE_LOG_TABLE, connection_string);
                return Ok(Vec::new());
            }
            Self::read_entries(conn)
        })
    }

    async fn add_change_log_entry(
        &self,
        connection_string: &str,
        entry: &ChangeLogEntry,
    ) -> DbResult<usize> {
        self.with_connection(connection_string, |conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {CHANGE_LOG_TABLE}
                     (filename, applied_by, change_date_time, content_hash, version, direction, description)
                     VALUES (?, ?, ?, ?, ?, ?, ?)"
                ),
                duckdb::params![
                    entry.filename(),
                    entry.applied_by(),
                    entry
                        .change_date_time()
                        .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                    entry.content_hash(),
                    entry.version().to_string(),
                    entry.direction().as_str(),
                    entry.description(),
                ],
            )
            .map_err(|e| {
                DbError::ExecutionError(format!(
                    "failed to record {}: {e}",
                    entry.filename()
                ))
            })
        })
    }

    async fn execute_script(&self, connection_string: &str, script: &str) -> DbResult<usize> {
        // The batch API does not report affected rows
        self.with_connection(connection_string, |conn| {
            conn.execute_batch(script)
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;
            Ok(0)
        })
    }

    fn name(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
