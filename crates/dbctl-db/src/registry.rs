//! Name-based connector selection.
//!
//! Connectors are registered once at startup together with their metadata;
//! the migration engine only ever sees the resolved [`Connector`].

use crate::duckdb::DuckDbConnector;
use crate::error::{DbError, DbResult};
use crate::traits::Connector;
use std::sync::Arc;

/// Describes a registered connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
}

type ConnectorFactory = Box<dyn Fn() -> Arc<dyn Connector> + Send + Sync>;

/// Registry of available connectors, keyed by case-insensitive name
#[derive(Default)]
pub struct ConnectorRegistry {
    entries: Vec<(ConnectorMetadata, ConnectorFactory)>,
}

impl ConnectorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry containing the connectors compiled into dbctl
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            ConnectorMetadata {
                name: "duckdb",
                description: "DuckDB embedded database",
                version: env!("CARGO_PKG_VERSION"),
            },
            || Arc::new(DuckDbConnector::new()),
        );
        registry
    }

    /// Add a connector. When names collide the first registration wins.
    pub fn register<F>(&mut self, metadata: ConnectorMetadata, factory: F)
    where
        F: Fn() -> Arc<dyn Connector> + Send + Sync + 'static,
    {
        self.entries.push((metadata, Box::new(factory)));
    }

    /// Metadata of every registered connector, in registration order
    pub fn available(&self) -> impl Iterator<Item = &ConnectorMetadata> {
        self.entries.iter().map(|(metadata, _)| metadata)
    }

    /// Instantiate the connector whose name matches `name`, ignoring case
    pub fn resolve(&self, name: &str) -> DbResult<Arc<dyn Connector>> {
        for (metadata, factory) in &self.entries {
            log::debug!(
                "Discovered connector {} {}",
                metadata.name,
                metadata.version
            );

            if metadata.name.eq_ignore_ascii_case(name) {
                log::info!(
                    "Selected connector {} {} ({})",
                    metadata.name,
                    metadata.version,
                    metadata.description
                );
                return Ok(factory());
            }
        }

        Err(DbError::ConnectorNotFound {
            name: name.to_string(),
            available: self
                .available()
                .map(|m| m.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
