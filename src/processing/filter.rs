//! Record filtering.

/// A per-record inclusion rule.
///
/// Implemented for any `Fn(&R) -> bool`, so ad-hoc predicates work alongside structured filter
/// types such as [`crate::apartment::ApartmentsFilters`].
pub trait RecordFilter<R> {
    /// Returns `true` if `record` should be kept.
    fn matches(&self, record: &R) -> bool;
}

impl<R, F> RecordFilter<R> for F
where
    F: Fn(&R) -> bool,
{
    fn matches(&self, record: &R) -> bool {
        self(record)
    }
}

/// Filter that keeps every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepAll;

impl<R> RecordFilter<R> for KeepAll {
    fn matches(&self, _record: &R) -> bool {
        true
    }
}

/// Returns the records matching `filter`, in their original relative order.
pub fn filter<R, F>(records: &[R], filter: &F) -> Vec<R>
where
    R: Clone,
    F: RecordFilter<R> + ?Sized,
{
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter, KeepAll, RecordFilter};

    #[test]
    fn closure_predicates_are_filters() {
        let even = |v: &i32| v % 2 == 0;
        assert!(even.matches(&4));
        assert!(!even.matches(&3));
    }

    #[test]
    fn filter_preserves_relative_order() {
        let out = filter(&[5, 2, 8, 1, 6], &|v: &i32| *v > 1);
        assert_eq!(out, vec![5, 2, 8, 6]);
    }

    #[test]
    fn keep_all_keeps_everything() {
        let out = filter(&["a", "b"], &KeepAll);
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn filter_can_return_empty() {
        let out = filter(&[1, 2, 3], &|_: &i32| false);
        assert!(out.is_empty());
        let out: Vec<i32> = filter(&[], &KeepAll);
        assert!(out.is_empty());
    }
}
