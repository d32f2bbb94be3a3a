use chrono::{DateTime, Utc};
use unidata_types::{QuerySpec, Record};

use super::util;
use crate::error::UnidataError;

/// Apply the query's filters to a flattened collection.
///
/// Filters are independent predicates combined with AND semantics, so their
/// evaluation order is irrelevant. Identifier lookups are unique by contract
/// and short-circuit the scan after the first match. Output order is
/// unspecified; the sorter imposes the canonical order next.
///
/// # Errors
/// Returns `Validation` when `start_date` or `end_date` cannot be parsed.
pub fn apply(
    records: Vec<Record>,
    spec: &QuerySpec,
    date_field: Option<&'static str>,
) -> Result<Vec<Record>, UnidataError> {
    let start = parse_range_bound(spec.start_date.as_deref(), "start_date", false)?;
    let end = parse_range_bound(spec.end_date.as_deref(), "end_date", true)?;
    let needle = spec.search.as_deref().map(str::to_lowercase);
    let id_lookup = spec.ticket_id.is_some() || spec.customer_id.is_some();

    let mut out = Vec::new();
    for record in records {
        if !matches(&record, spec, date_field, start, end, needle.as_deref()) {
            continue;
        }
        out.push(record);
        if id_lookup {
            break;
        }
    }
    Ok(out)
}

fn parse_range_bound(
    text: Option<&str>,
    field: &'static str,
    upper: bool,
) -> Result<Option<DateTime<Utc>>, UnidataError> {
    match text {
        None => Ok(None),
        Some(t) => util::parse_bound(t, upper).map(Some).ok_or_else(|| {
            UnidataError::validation(field, format!("not an ISO-8601 date or datetime: {t:?}"))
        }),
    }
}

fn matches(
    record: &Record,
    spec: &QuerySpec,
    date_field: Option<&str>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    needle: Option<&str>,
) -> bool {
    if let Some(id) = spec.ticket_id
        && !id_matches(record, "ticket_id", id)
    {
        return false;
    }
    if let Some(id) = spec.customer_id
        && !id_matches(record, "customer_id", id)
    {
        return false;
    }
    if let Some(status) = &spec.status
        && !field_eq(record, "status", status)
    {
        return false;
    }
    if let Some(priority) = &spec.priority
        && !field_eq(record, "priority", priority)
    {
        return false;
    }
    if let Some(metric) = &spec.metric
        && !field_eq(record, "metric", metric)
    {
        return false;
    }
    if (start.is_some() || end.is_some()) && !in_range(record, date_field, start, end) {
        return false;
    }
    if let Some(needle) = needle
        && !text_matches(record, needle)
    {
        return false;
    }
    true
}

fn id_matches(record: &Record, field: &str, id: u64) -> bool {
    record.get(field).and_then(serde_json::Value::as_u64) == Some(id)
}

fn field_eq(record: &Record, field: &str, expected: &str) -> bool {
    record.get(field).and_then(serde_json::Value::as_str) == Some(expected)
}

fn in_range(
    record: &Record,
    date_field: Option<&str>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> bool {
    // A record without a parseable date field cannot satisfy a range filter.
    let Some(ts) = date_field.and_then(|f| util::record_timestamp(record, f)) else {
        return false;
    };
    if let Some(start) = start
        && ts < start
    {
        return false;
    }
    if let Some(end) = end
        && ts > end
    {
        return false;
    }
    true
}

fn text_matches(record: &Record, needle: &str) -> bool {
    record.values().any(|value| {
        value
            .as_str()
            .is_some_and(|s| s.to_lowercase().contains(needle))
    })
}
