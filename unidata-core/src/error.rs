use thiserror::Error;

/// Unified error type for the unidata workspace.
///
/// Wraps query validation failures, unknown or unreachable sources, rate-limit
/// denials, and cache-backend faults. Cache-backend errors are always
/// recovered internally by falling back to memory-only caching; they never
/// reach a caller of `resolve`.
#[derive(Debug, Error)]
pub enum UnidataError {
    /// A query parameter is malformed or out of range. User-correctable;
    /// carries the offending field for per-field detail.
    #[error("invalid {field}: {msg}")]
    Validation {
        /// Name of the offending query parameter.
        field: &'static str,
        /// Human-readable explanation.
        msg: String,
    },

    /// The requested source name is not registered.
    #[error("unknown source: {name}")]
    UnknownSource {
        /// The unrecognized source name.
        name: String,
    },

    /// The backing data for a source could not be read in time.
    #[error("source {name} unavailable: {msg}")]
    SourceUnavailable {
        /// Source name that failed.
        name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The caller exceeded the admission ceiling for this source.
    #[error("rate limit exceeded: {limit} requests per window, retry in {retry_after_ms}ms")]
    RateLimitExceeded {
        /// Configured ceiling per window.
        limit: u64,
        /// Milliseconds until the current window rolls over.
        retry_after_ms: u64,
    },

    /// A shared cache backend failed. Internal only: the cache recovers by
    /// degrading to memory-only operation.
    #[error("cache backend error: {0}")]
    CacheBackend(String),

    /// Issues with returned data (missing fields, malformed shapes).
    #[error("data issue: {0}")]
    Data(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl UnidataError {
    /// Helper: build a `Validation` error for a named query parameter.
    pub fn validation(field: &'static str, msg: impl Into<String>) -> Self {
        Self::Validation {
            field,
            msg: msg.into(),
        }
    }

    /// Helper: build an `UnknownSource` error.
    pub fn unknown_source(source: impl Into<String>) -> Self {
        Self::UnknownSource {
            name: source.into(),
        }
    }

    /// Helper: build a `SourceUnavailable` error.
    pub fn source_unavailable(source: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            name: source.into(),
            msg: msg.into(),
        }
    }

    /// Stable wire code for the HTTP collaborator to map onto status codes
    /// and machine-readable error bodies.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::UnknownSource { .. } => "UNKNOWN_SOURCE",
            Self::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::CacheBackend(_) => "CACHE_BACKEND_ERROR",
            Self::Data(_) => "DATA_ERROR",
            Self::Other(_) => "INTERNAL_ERROR",
        }
    }
}
