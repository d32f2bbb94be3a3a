//! Fixed-window admission control.
//!
//! Requests are bucketed per `(caller, source)` pair into non-overlapping
//! wall-clock windows (`floor(now / window)`); each bucket admits up to the
//! configured limit and then denies until the window rolls over. The fixed
//! window is an approximation: a burst straddling a boundary can admit up to
//! twice the limit across two adjacent windows.
//!
//! Counters are local to this process. Replicated deployments multiply the
//! effective ceiling by the replica count unless the embedding service moves
//! the counters to a shared backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::debug;
use unidata_types::RateLimitConfig;

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request may proceed.
    Allow,
    /// The window budget is exhausted.
    Deny {
        /// Time until the current window rolls over.
        retry_after: Duration,
    },
}

impl Admission {
    /// Whether the request was admitted.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

struct Window {
    index: u64,
    count: u64,
}

/// Per-`(caller, source)` fixed-window request counter.
pub struct SourceRateLimiter {
    limit: u64,
    window_ms: u64,
    windows: Mutex<HashMap<(String, String), Window>>,
}

impl SourceRateLimiter {
    /// Create a limiter from its configuration. A zero-length window is
    /// widened to one millisecond to keep the bucket arithmetic defined.
    #[must_use]
    pub fn new(cfg: &RateLimitConfig) -> Self {
        let window_ms = u64::try_from(cfg.window.as_millis()).unwrap_or(u64::MAX);
        Self {
            limit: cfg.limit,
            window_ms: window_ms.max(1),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Check admission for one request at the current wall-clock time.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn check(&self, caller: &str, source: &str) -> Admission {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        self.check_at(caller, source, u64::try_from(now_ms).unwrap_or(u64::MAX))
    }

    /// Check admission at an explicit instant (milliseconds since the Unix
    /// epoch). This is the deterministic seam [`check`](Self::check) feeds.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn check_at(&self, caller: &str, source: &str, now_ms: u64) -> Admission {
        let index = now_ms / self.window_ms;
        let mut windows = self.windows.lock().expect("mutex poisoned");

        let window = windows
            .entry((caller.to_owned(), source.to_owned()))
            .or_insert(Window { index, count: 0 });
        if window.index != index {
            // Rollover resets the bucket; stale counts never carry forward.
            window.index = index;
            window.count = 0;
        }

        if window.count >= self.limit {
            let retry_after = Duration::from_millis((index + 1) * self.window_ms - now_ms);
            debug!(caller, source, limit = self.limit, "admission denied");
            return Admission::Deny { retry_after };
        }
        window.count += 1;
        Admission::Allow
    }

    /// Configured per-window ceiling.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}
