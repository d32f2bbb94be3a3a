//! Response-envelope cache.
//!
//! The in-process tier is an LRU with per-entry TTL, checked lazily on read.
//! An optional [`SharedStore`] mirrors entries to an external backend so
//! replicas can share hits; every shared round trip is bounded by a timeout
//! and any failure degrades the cache to memory-only for that call. Shared
//! failures are logged on state transitions, never surfaced to callers.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use unidata_core::UnidataError;
use unidata_types::{CacheConfig, Fingerprint, ResponseEnvelope};

/// Identity of one memoized resolution: which source, which normalized query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Source adapter name.
    pub source: String,
    /// Fingerprint of the normalized query spec.
    pub fingerprint: Fingerprint,
}

impl CacheKey {
    /// Build the key for one source/query pair.
    #[must_use]
    pub fn new(source: impl Into<String>, fingerprint: Fingerprint) -> Self {
        Self {
            source: source.into(),
            fingerprint,
        }
    }

    /// Namespaced key used in the shared store.
    #[must_use]
    pub fn shared_key(&self) -> String {
        format!("{}{}", shared_prefix(&self.source), self.fingerprint)
    }
}

fn shared_prefix(source: &str) -> String {
    format!("udc:data:{source}:")
}

/// External backend the cache mirrors entries to, typically a Redis-like
/// keyed store. Implementations own their serialization of errors into
/// [`UnidataError::CacheBackend`]; the cache treats every error identically.
#[async_trait]
pub trait SharedStore: Send + Sync {
    /// Fetch the serialized envelope stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, UnidataError>;
    /// Store a serialized envelope under `key` with the given lifetime.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), UnidataError>;
    /// Delete every key starting with `prefix`, returning how many were removed.
    async fn delete_prefix(&self, prefix: &str) -> Result<u64, UnidataError>;
}

struct Entry {
    envelope: Arc<ResponseEnvelope>,
    expires_at: Instant,
}

/// Memoizes resolved envelopes per `(source, fingerprint)`.
///
/// Entries are owned exclusively by the cache and handed out as `Arc` clones,
/// so a hit never copies the envelope and an eviction never invalidates a
/// response already in flight.
pub struct QueryCache {
    memory: Mutex<LruCache<CacheKey, Entry>>,
    ttl: Duration,
    shared: Option<Arc<dyn SharedStore>>,
    shared_ok: AtomicBool,
    shared_timeout: Duration,
}

impl QueryCache {
    /// Create a memory-only cache from its configuration.
    #[must_use]
    pub fn new(cfg: &CacheConfig) -> Self {
        // Zero capacity would panic inside the LRU.
        let cap = NonZeroUsize::new(cfg.max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory: Mutex::new(LruCache::new(cap)),
            ttl: cfg.ttl,
            shared: None,
            shared_ok: AtomicBool::new(true),
            shared_timeout: cfg.shared_timeout,
        }
    }

    /// Attach a shared store mirror.
    #[must_use]
    pub fn with_shared_store(mut self, store: Arc<dyn SharedStore>) -> Self {
        self.shared = Some(store);
        self
    }

    /// Look up a live entry.
    ///
    /// Checks the in-process tier first; on a miss, consults the shared store
    /// if one is attached. Shared hits are not promoted into memory; the
    /// mirror owns its own expiry and promotion would stretch the TTL.
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<ResponseEnvelope>> {
        {
            let mut guard = self.memory.lock().await;
            if let Some(entry) = guard.get(key) {
                if Instant::now() <= entry.expires_at {
                    return Some(Arc::clone(&entry.envelope));
                }
                guard.pop(key);
            }
        }

        let blob = self.shared_get(key).await?;
        match serde_json::from_str::<ResponseEnvelope>(&blob) {
            Ok(envelope) => Some(Arc::new(envelope)),
            Err(err) => {
                warn!(key = %key.shared_key(), %err, "discarding undecodable shared cache entry");
                None
            }
        }
    }

    /// Store a resolved envelope, returning the shared handle to it.
    pub async fn put(&self, key: CacheKey, envelope: ResponseEnvelope) -> Arc<ResponseEnvelope> {
        let envelope = Arc::new(envelope);
        let expires_at = Instant::now() + self.ttl;
        {
            let mut guard = self.memory.lock().await;
            guard.put(
                key.clone(),
                Entry {
                    envelope: Arc::clone(&envelope),
                    expires_at,
                },
            );
        }
        self.shared_set(&key, &envelope).await;
        envelope
    }

    /// Drop every entry belonging to `source`, in memory and in the shared
    /// store. Returns the number of in-memory entries removed.
    pub async fn invalidate(&self, source: &str) -> usize {
        let removed = {
            let mut guard = self.memory.lock().await;
            let doomed: Vec<CacheKey> = guard
                .iter()
                .filter(|(key, _)| key.source == source)
                .map(|(key, _)| key.clone())
                .collect();
            for key in &doomed {
                guard.pop(key);
            }
            doomed.len()
        };

        if let Some(store) = &self.shared {
            let prefix = shared_prefix(source);
            match tokio::time::timeout(self.shared_timeout, store.delete_prefix(&prefix)).await {
                Ok(Ok(n)) => {
                    self.mark_shared(true);
                    debug!(source, shared_removed = n, "shared cache invalidated");
                }
                Ok(Err(err)) => self.note_shared_failure("delete_prefix", &err),
                Err(_) => self.note_shared_timeout("delete_prefix"),
            }
        }

        removed
    }

    async fn shared_get(&self, key: &CacheKey) -> Option<String> {
        let store = self.shared.as_ref()?;
        match tokio::time::timeout(self.shared_timeout, store.get(&key.shared_key())).await {
            Ok(Ok(hit)) => {
                self.mark_shared(true);
                hit
            }
            Ok(Err(err)) => {
                self.note_shared_failure("get", &err);
                None
            }
            Err(_) => {
                self.note_shared_timeout("get");
                None
            }
        }
    }

    async fn shared_set(&self, key: &CacheKey, envelope: &ResponseEnvelope) {
        let Some(store) = &self.shared else {
            return;
        };
        let blob = match serde_json::to_string(envelope) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(%err, "envelope not serializable for shared cache");
                return;
            }
        };
        match tokio::time::timeout(
            self.shared_timeout,
            store.set(&key.shared_key(), blob, self.ttl),
        )
        .await
        {
            Ok(Ok(())) => {
                self.mark_shared(true);
            }
            Ok(Err(err)) => self.note_shared_failure("set", &err),
            Err(_) => self.note_shared_timeout("set"),
        }
    }

    fn note_shared_failure(&self, op: &'static str, err: &UnidataError) {
        if self.mark_shared(false) {
            warn!(op, %err, "shared cache unavailable, degrading to memory-only");
        }
    }

    fn note_shared_timeout(&self, op: &'static str) {
        if self.mark_shared(false) {
            warn!(op, timeout_ms = self.shared_timeout.as_millis() as u64, "shared cache timed out, degrading to memory-only");
        }
    }

    /// Record the shared store's health; returns true on a state transition.
    fn mark_shared(&self, healthy: bool) -> bool {
        let changed = self.shared_ok.swap(healthy, Ordering::Relaxed) != healthy;
        if changed && healthy {
            info!("shared cache recovered");
        }
        changed
    }

    /// Whether the last shared-store round trip succeeded. Memory-only caches
    /// report healthy.
    #[must_use]
    pub fn shared_healthy(&self) -> bool {
        self.shared_ok.load(Ordering::Relaxed)
    }
}
