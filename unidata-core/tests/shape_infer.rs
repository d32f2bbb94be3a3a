use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use unidata_core::pipeline::shape::{freshness, identify};
use unidata_core::{DataKind, Freshness};

#[test]
fn empty_collection_is_tabular() {
    assert_eq!(identify(&[]), DataKind::Tabular);
}

#[test]
fn nested_values_make_it_hierarchical() {
    let raw = vec![
        json!({ "id": 1, "date": "2026-08-01" }),
        json!({ "id": 2, "owner": { "name": "x" } }),
    ];
    assert_eq!(identify(&raw), DataKind::Hierarchical);
}

#[test]
fn array_values_make_it_hierarchical() {
    let raw = vec![json!({ "id": 1, "tags": ["a"] })];
    assert_eq!(identify(&raw), DataKind::Hierarchical);
}

#[test]
fn daily_cadence_is_time_series() {
    let raw: Vec<_> = (0..30)
        .map(|i| json!({ "date": format!("2026-07-{:02}", i + 1), "value": i }))
        .collect();
    assert_eq!(identify(&raw), DataKind::TimeSeries);
}

#[test]
fn cadence_survives_a_single_missing_day() {
    // One two-day gap: max delta is exactly twice the daily step.
    let days = [1, 2, 3, 5, 6, 7];
    let raw: Vec<_> = days
        .iter()
        .map(|d| json!({ "date": format!("2026-07-{d:02}"), "value": 0 }))
        .collect();
    assert_eq!(identify(&raw), DataKind::TimeSeries);
}

#[test]
fn irregular_timestamps_fall_back_to_tabular() {
    let raw = vec![
        json!({ "timestamp": "2026-01-01T00:00:00Z" }),
        json!({ "timestamp": "2026-01-01T00:01:00Z" }),
        json!({ "timestamp": "2026-06-01T00:00:00Z" }),
    ];
    assert_eq!(identify(&raw), DataKind::Tabular);
}

#[test]
fn missing_timestamp_on_any_record_means_tabular() {
    let raw = vec![
        json!({ "date": "2026-07-01", "value": 1 }),
        json!({ "value": 2 }),
    ];
    assert_eq!(identify(&raw), DataKind::Tabular);
}

#[test]
fn created_at_alone_does_not_make_a_series() {
    // Entities created on a daily schedule are still a table.
    let raw: Vec<_> = (0..10)
        .map(|i| json!({ "id": i, "created_at": format!("2026-07-{:02}T09:00:00Z", i + 1) }))
        .collect();
    assert_eq!(identify(&raw), DataKind::Tabular);
}

#[test]
fn single_dated_record_is_time_series() {
    let raw = vec![json!({ "date": "2026-07-01", "value": 1 })];
    assert_eq!(identify(&raw), DataKind::TimeSeries);
}

#[test]
fn freshness_thresholds() {
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();

    assert_eq!(freshness(None, now), Freshness::VeryStale);
    assert_eq!(
        freshness(Some(now - Duration::minutes(30)), now),
        Freshness::Fresh
    );
    assert_eq!(
        freshness(Some(now - Duration::hours(1)), now),
        Freshness::Stale
    );
    assert_eq!(
        freshness(Some(now - Duration::hours(24)), now),
        Freshness::Stale
    );
    assert_eq!(
        freshness(Some(now - Duration::hours(25)), now),
        Freshness::VeryStale
    );
}

#[test]
fn future_last_write_reads_as_fresh() {
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
    assert_eq!(
        freshness(Some(now + Duration::minutes(5)), now),
        Freshness::Fresh
    );
}
