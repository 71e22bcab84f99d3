//! In-memory connector for tests.
//!
//! Records every call so tests can assert on exactly what the engine did,
//! and can be told to fail a script or trip a cancellation token.

use crate::error::{DbError, DbResult};
use crate::traits::Connector;
use async_trait::async_trait;
use dbctl_core::ChangeLogEntry;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// A connector call, as observed by [`MemoryConnector`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateChangeLogTable,
    FetchChangeLogEntries,
    AddChangeLogEntry(String),
    ExecuteScript(String),
}

#[derive(Default)]
struct State {
    initialized: bool,
    entries: Vec<ChangeLogEntry>,
    calls: Vec<Call>,
}

/// Connector that keeps the change log in a `Vec`
#[derive(Default)]
pub struct MemoryConnector {
    state: Mutex<State>,
    failing_script: Option<String>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl MemoryConnector {
    /// Uninitialized database
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialized database whose change log already holds `entries`
    pub fn with_entries(entries: Vec<ChangeLogEntry>) -> Self {
        Self {
            state: Mutex::new(State {
                initialized: true,
                entries,
                calls: Vec::new(),
            }),
            ..Self::default()
        }
    }

    /// Fail `execute_script` when it receives exactly `script`
    pub fn failing_on(mut self, script: &str) -> Self {
        self.failing_script = Some(script.to_string());
        self
    }

    /// Cancel `token` once `count` entries have been added through this connector
    pub fn cancelling_after(mut self, count: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((count, token));
        self
    }

    fn lock(&self) -> DbResult<std::sync::MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Current change log contents, in insertion order
    pub fn entries(&self) -> Vec<ChangeLogEntry> {
        self.lock().map(|s| s.entries.clone()).unwrap_or_default()
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }

    /// Script texts executed so far, in order
    pub fn executed_scripts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ExecuteScript(script) => Some(script),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn create_change_log_table(&self, connection_string: &str) -> DbResult<usize> {
        let mut state = self.lock()?;
        state.calls.push(Call::CreateChangeLogTable);
        if state.initialized {
            return Err(DbError::ChangeLogTableExists(connection_string.to_string()));
        }
        state.initialized = true;
        Ok(0)
    }

    async fn fetch_change_log_entries(
        &self,
        _connection_string: &str,
    ) -> DbResult<Vec<ChangeLogEntry>> {
        let mut state = self.lock()?;
        state.calls.push(Call::FetchChangeLogEntries);
        Ok(state.entries.clone())
    }

    async fn add_change_log_entry(
        &self,
        _connection_string: &str,
        entry: &ChangeLogEntry,
    ) -> DbResult<usize> {
        let added = {
            let mut state = self.lock()?;
            state
                .calls
                .push(Call::AddChangeLogEntry(entry.filename().to_string()));
            state.entries.push(entry.clone());
            state
                .calls
                .iter()
                .filter(|c| matches!(c, Call::AddChangeLogEntry(_)))
                .count()
        };

        if let Some((count, token)) = &self.cancel_after {
            if added >= *count {
                token.cancel();
            }
        }
        Ok(1)
    }

    async fn execute_script(&self, _connection_string: &str, script: &str) -> DbResult<usize> {
        let mut state = self.lock()?;
        state.calls.push(Call::ExecuteScript(script.to_string()));
        if self.failing_script.as_deref() == Some(script) {
            return Err(DbError::ExecutionError(format!("syntax error in: {script}")));
        }
        Ok(0)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
