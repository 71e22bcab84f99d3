//! A connector bound to one connection string

use dbctl_db::Connector;
use std::fmt;
use std::sync::Arc;

/// The connector and connection string every command runs against
#[derive(Clone)]
pub struct DatabaseConnection {
    connector: Arc<dyn Connector>,
    connection_string: String,
}

impl DatabaseConnection {
    pub fn new(connector: Arc<dyn Connector>, connection_string: impl Into<String>) -> Self {
        Self {
            connector,
            connection_string: connection_string.into(),
        }
    }

    pub fn connector(&self) -> &dyn Connector {
        self.connector.as_ref()
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl fmt::Display for DatabaseConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Connection => {} -> {}",
            self.connector.name(),
            self.connection_string
        )
    }
}

impl fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConnection")
            .field("connector", &self.connector.name())
            .field("connection_string", &self.connection_string)
            .finish()
    }
}
