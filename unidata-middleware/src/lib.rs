//! unidata-middleware
//!
//! Cross-cutting concerns that sit between the orchestrator and the source
//! connectors:
//!
//! - [`cache`]: memoization of resolved response envelopes, keyed by
//!   `(source, query fingerprint)`, backed by an in-process LRU with per-entry
//!   TTL and an optional shared store mirror.
//! - [`rate_limit`]: fixed-window admission control per `(caller, source)`
//!   pair.
//!
//! Both components are infallible from the caller's point of view: a broken
//! cache backend degrades to memory-only operation, it never fails a request.
#![warn(missing_docs)]

/// Response-envelope cache.
pub mod cache;
/// Fixed-window admission control.
pub mod rate_limit;

pub use cache::{CacheKey, QueryCache, SharedStore};
pub use rate_limit::{Admission, SourceRateLimiter};
