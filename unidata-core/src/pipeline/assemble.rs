use chrono::{DateTime, SecondsFormat, Utc};
use unidata_types::{DataKind, Freshness, Metadata, QuerySpec, Record, ResponseEnvelope};

use super::summarize;

/// Wrap a page of records in the response envelope with full metadata.
pub fn assemble(
    records: Vec<Record>,
    spec: &QuerySpec,
    total: usize,
    kind: DataKind,
    freshness: Freshness,
    last_write: Option<DateTime<Utc>>,
    sort_field: Option<&'static str>,
) -> ResponseEnvelope {
    let returned = records.len();
    let total_pages = (total as u32).div_ceil(spec.page_size.max(1));
    let voice_context = format!(
        "Showing {returned} of {total} {kind} records. {}",
        summarize::sort_description(sort_field),
    );
    let data_freshness = match last_write {
        Some(ts) => format!("Data as of {}", ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => "Timestamp unavailable".to_owned(),
    };

    ResponseEnvelope {
        data: records,
        metadata: Metadata {
            total_results: total,
            returned_results: returned,
            data_freshness,
            staleness_indicator: freshness,
            data_type: kind,
            voice_context,
            page: spec.page,
            page_size: spec.page_size,
            total_pages,
            has_next: spec.page < total_pages,
        },
    }
}
