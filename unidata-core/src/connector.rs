use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::UnidataError;

/// One source's full record collection, read as an immutable snapshot.
///
/// Records are raw JSON values at this point; the pipeline's flattener turns
/// them into flat key/value views and skips anything that is not an object.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Raw records in source order.
    pub records: Vec<serde_json::Value>,
    /// When the backing store was last written, if the source knows.
    /// Drives the freshness label; `None` classifies as very stale.
    pub last_write: Option<DateTime<Utc>>,
}

impl Collection {
    /// Build a collection with an unknown last-write time.
    #[must_use]
    pub const fn new(records: Vec<serde_json::Value>) -> Self {
        Self {
            records,
            last_write: None,
        }
    }

    /// Attach the source's last-write timestamp.
    #[must_use]
    pub const fn with_last_write(mut self, at: DateTime<Utc>) -> Self {
        self.last_write = Some(at);
        self
    }

    /// Number of raw records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Capability trait implemented by source adapters.
///
/// Variants per source type are selected by registration at build time, not
/// by subclassing: the orchestrator keeps a registry keyed by `name()` and
/// routes each request to the matching connector.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    /// Stable source identifier used in request paths, cache tags, and
    /// rate-limit keys (e.g. "crm", "support", "analytics").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Read the source's full record collection.
    ///
    /// # Errors
    /// Returns `SourceUnavailable` when the backing store cannot be read.
    async fn fetch(&self) -> Result<Collection, UnidataError>;
}
