use chrono::{DateTime, TimeDelta, Utc};
use unidata_types::{DataKind, Freshness};

use super::util;

const FRESH_WITHIN: TimeDelta = TimeDelta::hours(1);
const STALE_WITHIN: TimeDelta = TimeDelta::hours(24);

/// Fields that mark a record as a point on a series axis. `created_at` is
/// deliberately absent: it is an entity attribute, and a table of entities
/// created on a schedule is still a table.
const SERIES_FIELDS: [&str; 2] = ["date", "timestamp"];

/// Classify the structural kind of a raw collection.
///
/// `hierarchical` wins if any record carries a nested mapping or array value.
/// `time_series` requires every record to carry a series field (`date` or
/// `timestamp`) whose values sit at a regular-ish cadence. Everything else,
/// including collections with missing or unparseable timestamps, is
/// `tabular`.
///
/// Pure function: no side effects, no failure modes.
#[must_use]
pub fn identify(records: &[serde_json::Value]) -> DataKind {
    let objects: Vec<&serde_json::Map<String, serde_json::Value>> =
        records.iter().filter_map(serde_json::Value::as_object).collect();
    if objects.is_empty() {
        return DataKind::Tabular;
    }

    if objects
        .iter()
        .any(|map| map.values().any(|v| v.is_object() || v.is_array()))
    {
        return DataKind::Hierarchical;
    }

    let mut timestamps = Vec::with_capacity(objects.len());
    for map in &objects {
        let Some(ts) = SERIES_FIELDS
            .into_iter()
            .find_map(|field| map.get(field).and_then(util::parse_timestamp))
        else {
            return DataKind::Tabular;
        };
        timestamps.push(ts);
    }

    if is_regular_cadence(&mut timestamps) {
        DataKind::TimeSeries
    } else {
        DataKind::Tabular
    }
}

/// Regular-ish spacing check: no positive adjacent delta may exceed twice the
/// representative step (the lower median of positive deltas).
fn is_regular_cadence(timestamps: &mut [DateTime<Utc>]) -> bool {
    timestamps.sort_unstable();

    let mut deltas: Vec<i64> = Vec::with_capacity(timestamps.len().saturating_sub(1));
    let mut last = timestamps[0];
    for &ts in timestamps.iter().skip(1) {
        let dt = ts - last;
        if dt > TimeDelta::zero() {
            deltas.push(dt.num_seconds());
            last = ts;
        }
    }
    if deltas.is_empty() {
        // One or two records, or all identical timestamps: vacuously regular.
        return true;
    }

    deltas.sort_unstable();
    let step = deltas[(deltas.len() - 1) / 2];
    let max = deltas[deltas.len() - 1];
    max <= step.saturating_mul(2)
}

/// Freshness label from the source's last-write time.
///
/// Unknown last-write classifies as very stale; a last-write in the future
/// (clock skew) classifies as fresh.
#[must_use]
pub fn freshness(last_write: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Freshness {
    let Some(at) = last_write else {
        return Freshness::VeryStale;
    };
    let age = now - at;
    if age < FRESH_WITHIN {
        Freshness::Fresh
    } else if age <= STALE_WITHIN {
        Freshness::Stale
    } else {
        Freshness::VeryStale
    }
}
