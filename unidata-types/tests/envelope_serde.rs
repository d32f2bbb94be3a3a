use unidata_types::{DataKind, Freshness, Metadata, ResponseEnvelope};

fn sample() -> ResponseEnvelope {
    let mut record = unidata_types::Record::new();
    record.insert("customer_id".into(), 1.into());
    record.insert("status".into(), "active".into());
    ResponseEnvelope {
        data: vec![record],
        metadata: Metadata {
            total_results: 47,
            returned_results: 1,
            data_freshness: "Data as of 2026-08-29T10:00:00+00:00".into(),
            staleness_indicator: Freshness::Fresh,
            data_type: DataKind::Tabular,
            voice_context: "Showing 1 of 47 tabular records. Sorted by created_at, newest first."
                .into(),
            page: 1,
            page_size: 5,
            total_pages: 10,
            has_next: true,
        },
    }
}

#[test]
fn wire_shape_matches_the_contract() {
    let json = serde_json::to_value(sample()).unwrap();
    let meta = &json["metadata"];

    assert_eq!(meta["total_results"], 47);
    assert_eq!(meta["returned_results"], 1);
    assert_eq!(meta["staleness_indicator"], "fresh");
    assert_eq!(meta["data_type"], "tabular");
    assert_eq!(meta["page"], 1);
    assert_eq!(meta["page_size"], 5);
    assert_eq!(meta["total_pages"], 10);
    assert_eq!(meta["has_next"], true);
    assert!(meta["voice_context"].as_str().unwrap().starts_with("Showing 1 of 47"));
    assert!(json["data"].as_array().unwrap().len() == 1);
}

#[test]
fn kind_and_freshness_serialize_snake_case() {
    assert_eq!(serde_json::to_value(DataKind::TimeSeries).unwrap(), "time_series");
    assert_eq!(serde_json::to_value(DataKind::Hierarchical).unwrap(), "hierarchical");
    assert_eq!(serde_json::to_value(Freshness::VeryStale).unwrap(), "very_stale");
    assert_eq!(DataKind::TimeSeries.as_str(), "time_series");
    assert_eq!(Freshness::Stale.as_str(), "stale");
}

#[test]
fn envelope_round_trips() {
    let env = sample();
    let json = serde_json::to_string(&env).unwrap();
    let back: ResponseEnvelope = serde_json::from_str(&json).unwrap();
    assert_eq!(env, back);
}
