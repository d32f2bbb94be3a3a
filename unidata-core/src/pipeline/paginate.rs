use unidata_types::Record;

use crate::error::UnidataError;

/// Reject out-of-range pagination parameters before any work is done.
///
/// # Errors
/// Returns `Validation` when `page` is zero or `page_size` is outside
/// `1..=max_page_size`.
pub fn validate(page: u32, page_size: u32, max_page_size: u32) -> Result<(), UnidataError> {
    if page < 1 {
        return Err(UnidataError::validation("page", "must be at least 1"));
    }
    if page_size < 1 || page_size > max_page_size {
        return Err(UnidataError::validation(
            "page_size",
            format!("must be between 1 and {max_page_size}, got {page_size}"),
        ));
    }
    Ok(())
}

/// Return the requested page, or an empty slice when it lies past the end.
pub fn slice(records: Vec<Record>, page: u32, page_size: u32) -> Vec<Record> {
    let start = (page as usize - 1) * page_size as usize;
    if start >= records.len() {
        return Vec::new();
    }
    records
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect()
}
