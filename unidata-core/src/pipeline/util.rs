use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use unidata_types::Record;

/// Date fields recognized for sorting and range filtering, in priority order.
pub const DATE_FIELD_PRIORITY: [&str; 3] = ["created_at", "date", "timestamp"];

/// Parse a JSON value into a UTC timestamp.
///
/// Accepts RFC 3339 strings (with `Z` or numeric offsets), naive ISO
/// datetimes (assumed UTC), bare ISO dates (midnight UTC), and integer epoch
/// seconds. Anything else is `None`.
#[must_use]
pub fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(text) => parse_timestamp_str(text),
        serde_json::Value::Number(n) => {
            let secs = n.as_i64()?;
            DateTime::from_timestamp(secs, 0)
        }
        _ => None,
    }
}

fn parse_timestamp_str(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Parse a date-range bound supplied as a query parameter.
///
/// A date-only upper bound is expanded to the end of that day so that
/// `end_date=2026-08-29` includes every record written on the 29th.
#[must_use]
pub fn parse_bound(text: &str, upper: bool) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if upper
        && let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
    {
        return Some(date.and_hms_milli_opt(23, 59, 59, 999)?.and_utc());
    }
    parse_timestamp_str(text)
}

/// First field from [`DATE_FIELD_PRIORITY`] present in any record.
///
/// The detected field governs both range filtering and sort order for the
/// whole collection; records lacking it sort after all dated records.
#[must_use]
pub fn detect_date_field(records: &[Record]) -> Option<&'static str> {
    DATE_FIELD_PRIORITY
        .into_iter()
        .find(|field| records.iter().any(|r| r.contains_key(*field)))
}

/// Parse the detected date field of one record, if present.
#[must_use]
pub fn record_timestamp(record: &Record, field: &str) -> Option<DateTime<Utc>> {
    record.get(field).and_then(parse_timestamp)
}
