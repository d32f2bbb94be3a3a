use unidata_types::{DataKind, Record};

/// Truncation outcome plus the spoken digest describing it.
pub struct Summary {
    /// Records after the voice-size cap.
    pub records: Vec<Record>,
    /// One-sentence description a voice layer can read verbatim.
    pub digest: String,
}

/// Cap the filtered set at `threshold` records and describe the result.
///
/// The digest reports how many records survive the cap against the filtered
/// total, so a voice layer can read it verbatim without inspecting the data.
pub fn summarize(
    mut records: Vec<Record>,
    total: usize,
    kind: DataKind,
    sort_field: Option<&'static str>,
    threshold: usize,
) -> Summary {
    if records.len() > threshold {
        records.truncate(threshold);
    }
    let digest = format!(
        "Showing {} of {} {} records. {}",
        records.len().min(threshold),
        total,
        kind,
        sort_description(sort_field),
    );
    Summary { records, digest }
}

pub(crate) fn sort_description(field: Option<&'static str>) -> String {
    match field {
        Some(field) => format!("Sorted by {field}, newest first."),
        None => "Unsorted.".to_owned(),
    }
}
