//! Configuration shared by the orchestrator and middleware components.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the query cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for each entry, measured from insertion.
    pub ttl: Duration,
    /// Maximum number of in-memory entries before LRU eviction.
    pub max_entries: usize,
    /// Bound on each shared-store round trip. A timeout is treated like any
    /// other backend error: the cache degrades to memory-only.
    pub shared_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_entries: 1024,
            shared_timeout: Duration::from_millis(250),
        }
    }
}

/// Configuration for fixed-window admission control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per (caller, source) pair per window.
    pub limit: u64,
    /// Duration of one fixed window.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: 100,
            window: Duration::from_secs(60),
        }
    }
}

/// Service-wide configuration for the unidata orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnidataConfig {
    /// Result-set size above which the summary generator truncates to keep
    /// responses voice-sized.
    pub summary_threshold: usize,
    /// Upper bound accepted for `page_size`; values outside `1..=max_page_size`
    /// are a validation error, never clamped.
    pub max_page_size: u32,
    /// Bound on each source fetch; exceeding it surfaces as `SourceUnavailable`.
    pub source_timeout: Duration,
    /// Query cache settings.
    pub cache: CacheConfig,
    /// Rate limiter settings.
    pub rate_limit: RateLimitConfig,
}

impl Default for UnidataConfig {
    fn default() -> Self {
        Self {
            summary_threshold: 10,
            max_page_size: 50,
            source_timeout: Duration::from_secs(5),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}
