use tracing::warn;
use unidata_types::Record;

/// Result of flattening a raw collection: normalized records plus the count
/// of malformed entries that were skipped.
#[derive(Debug, Clone)]
pub struct FlattenOutcome {
    /// Flattened records in source order.
    pub records: Vec<Record>,
    /// Raw entries that were not JSON objects and were dropped.
    pub skipped: usize,
}

/// Normalize a raw collection into flat key/value records.
///
/// Non-object entries are malformed for this data model; each one is skipped
/// with a warning rather than failing the whole request.
#[must_use]
pub fn flatten_all(raw: &[serde_json::Value]) -> FlattenOutcome {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;
    for value in raw {
        match value.as_object() {
            Some(map) => records.push(flatten_record(map)),
            None => {
                skipped += 1;
                warn!(kind = %value_kind(value), "skipping malformed record (not an object)");
            }
        }
    }
    FlattenOutcome { records, skipped }
}

/// Rewrite one record so nested mapping keys become dot-joined paths
/// (`parent.child`), recursively.
///
/// Arrays are kept as-is: arrays of scalars pass through unchanged, and
/// arrays of mappings are left unflattened, a known limitation callers must
/// handle explicitly. Already-flat records come back unchanged, so the
/// operation is idempotent.
#[must_use]
pub fn flatten_record(record: &Record) -> Record {
    let mut out = Record::new();
    flatten_into(&mut out, None, record);
    out
}

fn flatten_into(out: &mut Record, prefix: Option<&str>, record: &Record) {
    for (key, value) in record {
        let path = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match value {
            serde_json::Value::Object(nested) => flatten_into(out, Some(&path), nested),
            other => {
                out.insert(path, other.clone());
            }
        }
    }
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
