/// A single record from a source collection: an ordered mapping from field
/// name to JSON value.
///
/// Records are immutable once read from a source; pipeline stages derive new
/// sequences instead of mutating records in place, so cached output stays
/// referentially transparent. Ordering is preserved by `serde_json`'s
/// `preserve_order` feature.
pub type Record = serde_json::Map<String, serde_json::Value>;
