use serde_json::json;
use unidata_core::Record;
use unidata_core::pipeline::flatten::{flatten_all, flatten_record};

fn record(value: serde_json::Value) -> Record {
    value.as_object().cloned().unwrap()
}

#[test]
fn nested_keys_become_dot_paths() {
    let rec = record(json!({
        "id": 1,
        "customer": { "name": "Acme", "address": { "city": "Lisbon" } }
    }));

    let flat = flatten_record(&rec);

    assert_eq!(flat.get("id"), Some(&json!(1)));
    assert_eq!(flat.get("customer.name"), Some(&json!("Acme")));
    assert_eq!(flat.get("customer.address.city"), Some(&json!("Lisbon")));
    assert!(!flat.contains_key("customer"));
}

#[test]
fn flat_records_pass_through_unchanged() {
    let rec = record(json!({ "a": 1, "b": "x", "c": null }));
    assert_eq!(flatten_record(&rec), rec);
}

#[test]
fn flattening_is_idempotent() {
    let rec = record(json!({ "a": { "b": { "c": 3 } }, "d": true }));
    let once = flatten_record(&rec);
    let twice = flatten_record(&once);
    assert_eq!(once, twice);
}

#[test]
fn arrays_are_left_untouched() {
    let rec = record(json!({ "tags": ["red", "blue"], "n": 2 }));
    let flat = flatten_record(&rec);
    assert_eq!(flat.get("tags"), Some(&json!(["red", "blue"])));
}

#[test]
fn non_object_entries_are_skipped_and_counted() {
    let raw = vec![json!({ "id": 1 }), json!(42), json!("loose"), json!({ "id": 2 })];

    let outcome = flatten_all(&raw);

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.skipped, 2);
    assert_eq!(outcome.records[0].get("id"), Some(&json!(1)));
    assert_eq!(outcome.records[1].get("id"), Some(&json!(2)));
}

#[test]
fn empty_collection_flattens_to_empty() {
    let outcome = flatten_all(&[]);
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.skipped, 0);
}
