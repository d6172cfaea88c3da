//! Stable sorting by a statically known field.

use std::cmp::Ordering;

use crate::types::{SortDirection, Sorting};

/// A closed set of sortable fields for records of type `R`.
///
/// Each variant of an implementing enum pairs a field name with an explicit accessor; the pipeline
/// never looks fields up by name at runtime.
pub trait SortKey<R> {
    /// Compare `a` and `b` by this key in ascending order.
    fn compare(&self, a: &R, b: &R) -> Ordering;
}

/// Comparator for `key` in `direction`, or `None` if the direction does not reorder.
pub(crate) fn comparator<R, K>(
    key: &K,
    direction: SortDirection,
) -> Option<impl Fn(&R, &R) -> Ordering + Sync>
where
    K: SortKey<R> + Sync,
{
    let descending = match direction {
        SortDirection::None => return None,
        SortDirection::Asc => false,
        SortDirection::Desc => true,
    };
    Some(move |a: &R, b: &R| {
        let ord = key.compare(a, b);
        if descending { ord.reverse() } else { ord }
    })
}

/// Sort `records` in place according to `sorting`.
///
/// Does nothing if no key is set or the direction is [`SortDirection::None`]. The sort is
/// stable in both directions: records with equal keys keep their relative order.
pub fn sort<R, K>(records: &mut [R], sorting: &Sorting<K>)
where
    K: SortKey<R> + Sync,
{
    let Some(key) = sorting.sort_by.as_ref() else {
        return;
    };
    if let Some(cmp) = comparator(key, sorting.direction) {
        records.sort_by(cmp);
    }
}
