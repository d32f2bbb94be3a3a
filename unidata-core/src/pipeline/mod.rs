//! The query-resolution pipeline.
//!
//! Stage order is fixed: shape identification, flattening, filtering,
//! sorting, summary truncation, pagination, assembly. Truncation runs before
//! pagination so spoken output stays bounded even before paging; sorting runs
//! before truncation so "most recent" selection operates on the true order.
//!
//! Modules:
//! - `shape`: structural kind and freshness classification.
//! - `flatten`: nested-record normalization into flat key/value views.
//! - `filter`: conjunctive query predicates.
//! - `sort`: newest-first ordering by the detected date field.
//! - `summarize`: voice-size truncation and digest generation.
//! - `paginate`: page validation and slicing.
//! - `assemble`: final envelope and metadata composition.

/// Envelope and metadata composition.
pub mod assemble;
/// Conjunctive filter predicates.
pub mod filter;
/// Nested-record flattening.
pub mod flatten;
/// Page validation and slicing.
pub mod paginate;
/// Structural kind and freshness classification.
pub mod shape;
/// Newest-first ordering.
pub mod sort;
/// Voice-size truncation and digest.
pub mod summarize;
/// Timestamp parsing and date-field detection helpers.
pub mod util;

use chrono::{DateTime, Utc};
use unidata_types::{DataKind, Freshness, QuerySpec, Record, ResponseEnvelope};

use crate::connector::Collection;
use crate::error::UnidataError;

/// Output of the fetch-to-sort portion of the pipeline: the filtered, ordered
/// record sequence before any truncation or paging.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Filtered, sorted records (pre-truncation).
    pub records: Vec<Record>,
    /// Count after filtering; this is what `total_results` reports.
    pub total_count: usize,
    /// Structural kind of the raw collection.
    pub data_kind: DataKind,
    /// Freshness label of the source snapshot.
    pub freshness: Freshness,
    /// Date field the sorter detected, if any.
    pub sort_field: Option<&'static str>,
    /// Malformed records skipped during flattening.
    pub skipped: usize,
}

/// Run the pipeline through the sort stage.
///
/// This is the shared front half used by both the paginated and the streaming
/// paths; streaming emits `records` as-is, with no truncation or paging.
///
/// # Errors
/// Returns `Validation` when a date-range bound cannot be parsed.
pub fn run(
    collection: &Collection,
    spec: &QuerySpec,
    now: DateTime<Utc>,
) -> Result<PipelineResult, UnidataError> {
    let data_kind = shape::identify(&collection.records);
    let freshness = shape::freshness(collection.last_write, now);

    let flattened = flatten::flatten_all(&collection.records);
    let sort_field = util::detect_date_field(&flattened.records);

    let filtered = filter::apply(flattened.records, spec, sort_field)?;
    let total_count = filtered.len();
    let records = sort::newest_first(filtered, sort_field);

    Ok(PipelineResult {
        records,
        total_count,
        data_kind,
        freshness,
        sort_field,
        skipped: flattened.skipped,
    })
}

/// Run the full pipeline and assemble the response envelope.
///
/// # Errors
/// Returns `Validation` for out-of-range pagination parameters or
/// unparseable date-range bounds.
pub fn execute(
    collection: &Collection,
    spec: &QuerySpec,
    summary_threshold: usize,
    max_page_size: u32,
    now: DateTime<Utc>,
) -> Result<ResponseEnvelope, UnidataError> {
    paginate::validate(spec.page, spec.page_size, max_page_size)?;

    let result = run(collection, spec, now)?;
    let summary = summarize::summarize(
        result.records,
        result.total_count,
        result.data_kind,
        result.sort_field,
        summary_threshold,
    );
    let page = paginate::slice(summary.records, spec.page, spec.page_size);

    Ok(assemble::assemble(
        page,
        spec,
        result.total_count,
        result.data_kind,
        result.freshness,
        collection.last_write,
        result.sort_field,
    ))
}
