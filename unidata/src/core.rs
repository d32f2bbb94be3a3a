use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::Mutex as AsyncMutex;
use unidata_core::{Collection, SourceConnector, UnidataError};
use unidata_middleware::cache::{CacheKey, QueryCache, SharedStore};
use unidata_middleware::rate_limit::SourceRateLimiter;
use unidata_types::UnidataConfig;

/// The query-resolution orchestrator.
///
/// Owns the source registry, the response cache, and the admission limiter;
/// request control flow lives in the `resolve`/`resolve_stream` entry points.
pub struct Unidata {
    pub(crate) sources: HashMap<&'static str, Arc<dyn SourceConnector>>,
    pub(crate) cache: QueryCache,
    pub(crate) limiter: SourceRateLimiter,
    pub(crate) cfg: UnidataConfig,
    // In-flight cache misses, one gate per key, so concurrent identical
    // queries coalesce into a single source fetch.
    pub(crate) inflight: StdMutex<HashMap<CacheKey, Arc<AsyncMutex<()>>>>,
}

/// Builder for [`Unidata`].
pub struct UnidataBuilder {
    sources: Vec<Arc<dyn SourceConnector>>,
    shared_store: Option<Arc<dyn SharedStore>>,
    cfg: UnidataConfig,
}

impl Default for UnidataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UnidataBuilder {
    /// Create a builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            shared_store: None,
            cfg: UnidataConfig::default(),
        }
    }

    /// Register a source connector. Requests address it by its `name()`.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn SourceConnector>) -> Self {
        self.sources.push(source);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: UnidataConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Result-set size above which summaries truncate.
    #[must_use]
    pub const fn summary_threshold(mut self, threshold: usize) -> Self {
        self.cfg.summary_threshold = threshold;
        self
    }

    /// Lifetime of cached envelopes.
    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cfg.cache.ttl = ttl;
        self
    }

    /// Capacity of the in-memory cache tier.
    #[must_use]
    pub const fn cache_capacity(mut self, max_entries: usize) -> Self {
        self.cfg.cache.max_entries = max_entries;
        self
    }

    /// Admission ceiling per `(caller, source)` pair per window.
    #[must_use]
    pub const fn rate_limit(mut self, limit: u64, window: Duration) -> Self {
        self.cfg.rate_limit.limit = limit;
        self.cfg.rate_limit.window = window;
        self
    }

    /// Bound on each source fetch.
    #[must_use]
    pub const fn source_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.source_timeout = timeout;
        self
    }

    /// Attach a shared cache backend mirrored behind the in-memory tier.
    #[must_use]
    pub fn shared_store(mut self, store: Arc<dyn SharedStore>) -> Self {
        self.shared_store = Some(store);
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Fails when no sources are registered or two sources share a name.
    pub fn build(self) -> Result<Unidata, UnidataError> {
        if self.sources.is_empty() {
            return Err(UnidataError::Other(
                "no sources registered; add at least one via with_source(...)".to_owned(),
            ));
        }

        let mut registry: HashMap<&'static str, Arc<dyn SourceConnector>> = HashMap::new();
        for source in self.sources {
            let name = source.name();
            if registry.insert(name, source).is_some() {
                return Err(UnidataError::Other(format!(
                    "duplicate source name: {name}"
                )));
            }
        }

        let mut cache = QueryCache::new(&self.cfg.cache);
        if let Some(store) = self.shared_store {
            cache = cache.with_shared_store(store);
        }
        let limiter = SourceRateLimiter::new(&self.cfg.rate_limit);

        Ok(Unidata {
            sources: registry,
            cache,
            limiter,
            cfg: self.cfg,
            inflight: StdMutex::new(HashMap::new()),
        })
    }
}

impl Unidata {
    /// Start building a new `Unidata` instance.
    ///
    /// Typical usage registers the demo sources and tweaks a few knobs:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let unidata = unidata::Unidata::builder()
    ///     .with_source(Arc::new(unidata_mock::CrmSource))
    ///     .with_source(Arc::new(unidata_mock::SupportSource))
    ///     .cache_ttl(Duration::from_secs(60))
    ///     .rate_limit(100, Duration::from_secs(60))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> UnidataBuilder {
        UnidataBuilder::new()
    }

    /// Registered sources as `(name, vendor)` pairs, in no particular order.
    #[must_use]
    pub fn sources(&self) -> Vec<(&'static str, &'static str)> {
        self.sources
            .values()
            .map(|s| (s.name(), s.vendor()))
            .collect()
    }

    pub(crate) fn connector(
        &self,
        source: &str,
    ) -> Result<Arc<dyn SourceConnector>, UnidataError> {
        self.sources
            .get(source)
            .cloned()
            .ok_or_else(|| UnidataError::unknown_source(source))
    }

    /// Wrap a source fetch with the configured timeout, mapping expiry onto
    /// `SourceUnavailable`.
    pub(crate) async fn fetch_with_timeout(
        &self,
        connector: &dyn SourceConnector,
    ) -> Result<Collection, UnidataError> {
        (tokio::time::timeout(self.cfg.source_timeout, connector.fetch()).await).unwrap_or_else(
            |_| {
                Err(UnidataError::source_unavailable(
                    connector.name(),
                    format!(
                        "fetch timed out after {}ms",
                        u64::try_from(self.cfg.source_timeout.as_millis()).unwrap_or(u64::MAX)
                    ),
                ))
            },
        )
    }
}
