//! unidata-types
//!
//! Shared data transfer objects and configuration primitives for the unidata
//! workspace.
//!
//! - `query`: normalized query parameters and their stable fingerprint.
//! - `envelope`: the wire response shape (`data` + voice-oriented metadata).
//! - `shape`: structural kind and freshness classifications of a collection.
//! - `config`: cache, rate-limit, and service-wide configuration.
#![warn(missing_docs)]

mod config;
mod envelope;
mod query;
mod record;
mod shape;

pub use config::{CacheConfig, RateLimitConfig, UnidataConfig};
pub use envelope::{Metadata, ResponseEnvelope};
pub use query::{Fingerprint, QuerySpec};
pub use record::Record;
pub use shape::{DataKind, Freshness};
