//! unidata-core
//!
//! Core traits and the query-resolution pipeline shared across the unidata
//! ecosystem.
//!
//! - `connector`: the `SourceConnector` trait and the `Collection` snapshot it
//!   yields.
//! - `error`: the unified `UnidataError` taxonomy with stable wire codes.
//! - `pipeline`: the ordered transformation from raw records to a paginated,
//!   voice-annotated response (shape identification, flattening, filtering,
//!   sorting, summarization, pagination, assembly).
//!
//! The pipeline is side-effect free: every stage derives a new record
//! sequence, which is what makes memoizing its output per query fingerprint
//! sound.
#![warn(missing_docs)]

/// The `SourceConnector` trait and collection snapshot type.
pub mod connector;
/// Unified error type and wire codes.
pub mod error;
/// Pipeline stages and the end-to-end `execute` entry point.
pub mod pipeline;

pub use connector::{Collection, SourceConnector};
pub use error::UnidataError;
pub use pipeline::{PipelineResult, execute, run};
pub use unidata_types::{
    CacheConfig, DataKind, Fingerprint, Freshness, Metadata, QuerySpec, RateLimitConfig, Record,
    ResponseEnvelope, UnidataConfig,
};
