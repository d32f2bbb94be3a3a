//! unidata
//!
//! High-level query-resolution orchestrator over pluggable record sources.
//!
//! A [`Unidata`] instance owns a registry of [`SourceConnector`]s and
//! resolves normalized queries against them: it checks admission per
//! `(caller, source)` pair, memoizes resolved envelopes per query
//! fingerprint, and on a cache miss runs the fetched collection through the
//! filtering/sorting/summarizing/paginating pipeline. Streaming consumers
//! get the filtered, sorted records one at a time instead, with no envelope.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use unidata::{QuerySpec, Unidata};
//!
//! # async fn demo() -> Result<(), unidata::UnidataError> {
//! let unidata = Unidata::builder()
//!     .with_source(Arc::new(unidata_mock::CrmSource))
//!     .build()?;
//!
//! let spec = QuerySpec::default().status("active").page_size(5);
//! let envelope = unidata.resolve("voice-agent", "crm", &spec).await?;
//! println!("{}", envelope.metadata.voice_context);
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

mod core;
mod resolver;

pub use crate::core::{Unidata, UnidataBuilder};
pub use unidata_core::{Collection, SourceConnector, UnidataError, pipeline};
pub use unidata_middleware::{Admission, CacheKey, QueryCache, SharedStore, SourceRateLimiter};
pub use unidata_types::{
    CacheConfig, DataKind, Fingerprint, Freshness, Metadata, QuerySpec, RateLimitConfig, Record,
    ResponseEnvelope, UnidataConfig,
};
