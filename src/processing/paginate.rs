//! Page window extraction.

use crate::types::Pagination;

/// Returns the records in `pagination`'s window, clamped to bounds.
///
/// An offset past the end yields an empty page.
pub fn paginate<R: Clone>(records: &[R], pagination: &Pagination) -> Vec<R> {
    records[pagination.range(records.len())].to_vec()
}

/// Owned variant of [`paginate`] that avoids cloning the kept records.
pub(crate) fn paginate_owned<R>(mut records: Vec<R>, pagination: &Pagination) -> Vec<R> {
    let range = pagination.range(records.len());
    records.truncate(range.end);
    records.drain(..range.start);
    records
}
