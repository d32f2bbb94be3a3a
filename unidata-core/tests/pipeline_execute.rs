use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use unidata_core::pipeline::{paginate, summarize};
use unidata_core::{Collection, DataKind, Freshness, QuerySpec, Record, UnidataError, execute};

fn customers(n: usize, active: usize, now: chrono::DateTime<chrono::Utc>) -> Collection {
    let records = (1..=n)
        .map(|i| {
            json!({
                "customer_id": i,
                "name": format!("Customer {i}"),
                "status": if i <= active { "active" } else { "inactive" },
                "created_at": (now - Duration::days(i as i64)).to_rfc3339(),
            })
        })
        .collect();
    Collection::new(records).with_last_write(now - Duration::minutes(30))
}

#[test]
fn paginated_envelope_reports_filtered_totals() {
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
    let collection = customers(60, 47, now);
    let spec = QuerySpec::default().status("active").page(1).page_size(5);

    let envelope = execute(&collection, &spec, 10, 50, now).unwrap();

    assert_eq!(envelope.data.len(), 5);
    assert_eq!(envelope.metadata.total_results, 47);
    assert_eq!(envelope.metadata.returned_results, 5);
    assert_eq!(envelope.metadata.total_pages, 10);
    assert!(envelope.metadata.has_next);
    assert_eq!(envelope.metadata.data_type, DataKind::Tabular);
    assert_eq!(envelope.metadata.staleness_indicator, Freshness::Fresh);
    assert_eq!(
        envelope.metadata.voice_context,
        "Showing 5 of 47 tabular records. Sorted by created_at, newest first."
    );
}

#[test]
fn page_past_the_end_is_empty_not_an_error() {
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
    let collection = customers(60, 47, now);
    let spec = QuerySpec::default().status("active").page(10).page_size(5);

    let envelope = execute(&collection, &spec, 10, 50, now).unwrap();

    // Truncation caps the working set at 10, so page 10 of size 5 is empty
    // even though 47 records matched.
    assert!(envelope.data.is_empty());
    assert_eq!(envelope.metadata.returned_results, 0);
    assert_eq!(envelope.metadata.total_results, 47);
    assert!(!envelope.metadata.has_next);
}

#[test]
fn results_come_back_newest_first() {
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
    let collection = customers(10, 10, now);
    let spec = QuerySpec::default().page_size(10);

    let envelope = execute(&collection, &spec, 20, 50, now).unwrap();

    let ids: Vec<u64> = envelope
        .data
        .iter()
        .map(|r| r.get("customer_id").and_then(serde_json::Value::as_u64).unwrap())
        .collect();
    assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
}

#[test]
fn data_freshness_carries_the_last_write_timestamp() {
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
    let collection = customers(3, 3, now);

    let envelope = execute(&collection, &QuerySpec::default(), 10, 50, now).unwrap();
    assert_eq!(
        envelope.metadata.data_freshness,
        "Data as of 2026-08-29T11:30:00Z"
    );
}

#[test]
fn missing_last_write_reads_as_very_stale() {
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
    let collection = Collection::new(vec![json!({ "id": 1 })]);

    let envelope = execute(&collection, &QuerySpec::default(), 10, 50, now).unwrap();
    assert_eq!(envelope.metadata.staleness_indicator, Freshness::VeryStale);
    assert_eq!(envelope.metadata.data_freshness, "Timestamp unavailable");
}

#[test]
fn zero_page_is_rejected() {
    let err = paginate::validate(0, 10, 50).unwrap_err();
    assert!(matches!(err, UnidataError::Validation { field: "page", .. }));
}

#[test]
fn page_size_bounds_are_enforced() {
    assert!(paginate::validate(1, 1, 50).is_ok());
    assert!(paginate::validate(1, 50, 50).is_ok());
    let err = paginate::validate(1, 0, 50).unwrap_err();
    assert!(matches!(err, UnidataError::Validation { field: "page_size", .. }));
    let err = paginate::validate(1, 51, 50).unwrap_err();
    assert!(matches!(err, UnidataError::Validation { field: "page_size", .. }));
}

#[test]
fn oversized_page_size_fails_the_whole_request() {
    let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
    let collection = customers(3, 3, now);
    let spec = QuerySpec::default().page_size(500);

    let err = execute(&collection, &spec, 10, 50, now).unwrap_err();
    assert!(matches!(err, UnidataError::Validation { field: "page_size", .. }));
}

#[test]
fn summary_digest_reports_truncation_against_the_filtered_total() {
    let records: Vec<Record> = (0..25)
        .map(|i| json!({ "id": i }).as_object().cloned().unwrap())
        .collect();

    let summary = summarize::summarize(records, 25, DataKind::Tabular, Some("created_at"), 10);

    assert_eq!(summary.records.len(), 10);
    assert_eq!(
        summary.digest,
        "Showing 10 of 25 tabular records. Sorted by created_at, newest first."
    );
}

#[test]
fn summary_below_threshold_is_untouched() {
    let records: Vec<Record> = (0..4)
        .map(|i| json!({ "id": i }).as_object().cloned().unwrap())
        .collect();

    let summary = summarize::summarize(records, 4, DataKind::TimeSeries, None, 10);

    assert_eq!(summary.records.len(), 4);
    assert_eq!(summary.digest, "Showing 4 of 4 time_series records. Unsorted.");
}
