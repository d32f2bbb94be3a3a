//! Caller-configured connectors for exercising orchestrator behavior.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use unidata_core::{Collection, SourceConnector, UnidataError};

/// Connector that serves a caller-supplied snapshot.
pub struct StaticSource {
    name: &'static str,
    records: Vec<serde_json::Value>,
    last_write: Option<DateTime<Utc>>,
}

impl StaticSource {
    /// Build a source named `name` serving exactly `records`.
    #[must_use]
    pub const fn new(name: &'static str, records: Vec<serde_json::Value>) -> Self {
        Self {
            name,
            records,
            last_write: None,
        }
    }

    /// Attach a last-write timestamp to the served snapshot.
    #[must_use]
    pub const fn with_last_write(mut self, at: DateTime<Utc>) -> Self {
        self.last_write = Some(at);
        self
    }
}

#[async_trait]
impl SourceConnector for StaticSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "unidata-mock"
    }

    async fn fetch(&self) -> Result<Collection, UnidataError> {
        let mut collection = Collection::new(self.records.clone());
        collection.last_write = self.last_write;
        Ok(collection)
    }
}

/// How a [`FailingSource`] misbehaves.
#[derive(Debug, Clone, Copy)]
pub enum FailureMode {
    /// Fail every fetch immediately.
    Error,
    /// Sleep long enough to trip any reasonable fetch timeout.
    Hang,
}

/// Connector that never returns data.
pub struct FailingSource {
    name: &'static str,
    mode: FailureMode,
}

impl FailingSource {
    /// Build a source named `name` with the given failure mode.
    #[must_use]
    pub const fn new(name: &'static str, mode: FailureMode) -> Self {
        Self { name, mode }
    }
}

#[async_trait]
impl SourceConnector for FailingSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "unidata-mock"
    }

    async fn fetch(&self) -> Result<Collection, UnidataError> {
        match self.mode {
            FailureMode::Error => Err(UnidataError::source_unavailable(
                self.name,
                "forced failure",
            )),
            FailureMode::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Collection::default())
            }
        }
    }
}
