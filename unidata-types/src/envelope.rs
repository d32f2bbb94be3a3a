use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::shape::{DataKind, Freshness};

/// Voice-oriented response metadata.
///
/// The field names and layout are the wire contract; clients depend on this
/// exact shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Count after filtering, before truncation and pagination. Never the raw
    /// collection size.
    pub total_results: usize,
    /// Number of records in `data`.
    pub returned_results: usize,
    /// Human-readable freshness line, e.g. `"Data as of 2026-08-29T10:00:00Z"`.
    pub data_freshness: String,
    /// Qualitative staleness label.
    pub staleness_indicator: Freshness,
    /// Structural kind of the source collection.
    pub data_type: DataKind,
    /// One-sentence spoken digest of the result set.
    pub voice_context: String,
    /// One-based page number echoed from the query.
    pub page: u32,
    /// Page size echoed from the query.
    pub page_size: u32,
    /// `ceil(total_results / page_size)`.
    pub total_pages: u32,
    /// Whether a further page exists (`page < total_pages`).
    pub has_next: bool,
}

/// The assembled response payload: a page of records plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Truncated, paginated records.
    pub data: Vec<Record>,
    /// Voice-oriented metadata describing the full filtered set.
    pub metadata: Metadata,
}
