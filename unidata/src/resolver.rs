//! Request control flow: admission, cache lookup, coalesced fetch, pipeline
//! execution, and streaming.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tracing::{debug, instrument};
use unidata_core::pipeline;
use unidata_core::{Record, UnidataError};
use unidata_middleware::cache::CacheKey;
use unidata_middleware::rate_limit::Admission;
use unidata_types::{QuerySpec, ResponseEnvelope};

use crate::core::Unidata;

/// Buffered records between the pipeline and a streaming consumer.
const STREAM_BUFFER: usize = 32;

impl Unidata {
    /// Resolve one query against a named source.
    ///
    /// Control flow, in order: admission check, source lookup, pagination
    /// validation, cache lookup, then on a miss a coalesced fetch-and-execute
    /// whose result is stored before being returned. Concurrent misses for
    /// the same `(source, fingerprint)` share one source fetch.
    ///
    /// # Errors
    /// - `RateLimitExceeded` when the caller's window budget is exhausted.
    /// - `UnknownSource` for an unregistered source name.
    /// - `Validation` for out-of-range pagination or malformed date bounds.
    /// - `SourceUnavailable` when the fetch fails or times out.
    #[instrument(skip(self, spec), fields(page = spec.page, page_size = spec.page_size))]
    pub async fn resolve(
        &self,
        caller: &str,
        source: &str,
        spec: &QuerySpec,
    ) -> Result<Arc<ResponseEnvelope>, UnidataError> {
        self.admit(caller, source)?;
        let connector = self.connector(source)?;
        pipeline::paginate::validate(spec.page, spec.page_size, self.cfg.max_page_size)?;

        let key = CacheKey::new(source, spec.fingerprint());
        if let Some(hit) = self.cache.get(&key).await {
            debug!(source, "cache hit");
            return Ok(hit);
        }

        let flight = self.join_flight(&key);
        let _leader = flight.gate.lock().await;

        // A coalesced waiter lands here after the leader stored the entry.
        if let Some(hit) = self.cache.get(&key).await {
            debug!(source, "cache hit after coalesced miss");
            return Ok(hit);
        }

        let collection = self.fetch_with_timeout(connector.as_ref()).await?;
        let envelope = pipeline::execute(
            &collection,
            spec,
            self.cfg.summary_threshold,
            self.cfg.max_page_size,
            Utc::now(),
        )?;
        debug!(
            source,
            total = envelope.metadata.total_results,
            returned = envelope.metadata.returned_results,
            "resolved from source"
        );
        Ok(self.cache.put(key, envelope).await)
    }

    /// Resolve a query as a record stream.
    ///
    /// Streaming bypasses the cache, summary truncation, and pagination: the
    /// full filtered, sorted record sequence is sent one record at a time.
    /// Dropping the receiver cancels the producer. Admission control still
    /// applies.
    ///
    /// # Errors
    /// Same as [`resolve`](Self::resolve), minus pagination validation.
    #[instrument(skip(self, spec))]
    pub async fn resolve_stream(
        &self,
        caller: &str,
        source: &str,
        spec: &QuerySpec,
    ) -> Result<mpsc::Receiver<Record>, UnidataError> {
        self.admit(caller, source)?;
        let connector = self.connector(source)?;

        let collection = self.fetch_with_timeout(connector.as_ref()).await?;
        let result = pipeline::run(&collection, spec, Utc::now())?;
        debug!(source, total = result.total_count, "streaming resolved records");

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(async move {
            for record in result.records {
                if tx.send(record).await.is_err() {
                    // Receiver dropped; stop producing.
                    break;
                }
            }
        });
        Ok(rx)
    }

    /// Drop every cached envelope for `source`, returning how many in-memory
    /// entries were removed.
    ///
    /// # Errors
    /// Returns `UnknownSource` for an unregistered source name.
    #[instrument(skip(self))]
    pub async fn invalidate(&self, source: &str) -> Result<usize, UnidataError> {
        self.connector(source)?;
        let removed = self.cache.invalidate(source).await;
        debug!(source, removed, "cache invalidated");
        Ok(removed)
    }

    /// Run only the admission check, without resolving anything.
    #[must_use]
    pub fn check_admission(&self, caller: &str, source: &str) -> Admission {
        self.limiter.check(caller, source)
    }

    fn admit(&self, caller: &str, source: &str) -> Result<(), UnidataError> {
        match self.limiter.check(caller, source) {
            Admission::Allow => Ok(()),
            Admission::Deny { retry_after } => Err(UnidataError::RateLimitExceeded {
                limit: self.limiter.limit(),
                retry_after_ms: u64::try_from(retry_after.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }

    /// Fetch (or create) the in-flight gate for `key`. The returned handle
    /// removes the registry entry once the last participant drops it, so a
    /// cancelled leader never strands the gate.
    fn join_flight(&self, key: &CacheKey) -> Flight<'_> {
        let gate = {
            let mut inflight = self.inflight.lock().expect("mutex poisoned");
            Arc::clone(inflight.entry(key.clone()).or_default())
        };
        Flight {
            owner: self,
            key: key.clone(),
            gate,
        }
    }
}

/// Participation handle in one coalesced miss.
struct Flight<'a> {
    owner: &'a Unidata,
    key: CacheKey,
    gate: Arc<AsyncMutex<()>>,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        let mut inflight = self.owner.inflight.lock().expect("mutex poisoned");
        // Two references left means the registry's and this handle's: no
        // other participant remains. Joins are serialized by the same lock,
        // so the count cannot grow underneath us.
        if Arc::strong_count(&self.gate) <= 2 {
            inflight.remove(&self.key);
        }
    }
}
