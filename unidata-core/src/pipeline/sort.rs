use std::cmp::Ordering;

use unidata_types::Record;

use super::util;

/// Order records newest-first by the detected date field.
///
/// Records whose date field is missing or unparseable sink to the end; the
/// sort is stable, so ties and undated records keep their source order. With
/// no detected field the input order is preserved.
pub fn newest_first(records: Vec<Record>, field: Option<&'static str>) -> Vec<Record> {
    let Some(field) = field else {
        return records;
    };

    let mut keyed: Vec<_> = records
        .into_iter()
        .map(|record| (util::record_timestamp(&record, field), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, record)| record).collect()
}
