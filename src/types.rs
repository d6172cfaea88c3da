//! Core value types for the query pipeline.
//!
//! Every type here is an immutable input or output of a single pipeline run. Optional parts of a
//! query (bounds, sort key, page window) have explicit defaults instead of being constructed on
//! demand by callers.

use serde::{Deserialize, Serialize};

/// Default page size used by [`Pagination::default`].
pub const DEFAULT_PAGE_LIMIT: usize = 5;

/// Sort direction for a [`Sorting`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending by the sort key.
    Asc,
    /// Descending by the sort key.
    Desc,
    /// Keep the upstream (filtered) order.
    #[default]
    None,
}

/// Which field to sort by, and in which direction.
///
/// `K` is a closed set of sortable fields (see [`crate::processing::SortKey`]).
/// When `sort_by` is `None` or `direction` is [`SortDirection::None`], the pipeline does not
/// reorder records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sorting<K> {
    /// Field to sort by.
    pub sort_by: Option<K>,
    /// Sort direction.
    pub direction: SortDirection,
}

impl<K> Sorting<K> {
    /// Create a sorting by `key` in `direction`.
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self {
            sort_by: Some(key),
            direction,
        }
    }

    /// Shorthand for an ascending sort.
    pub fn asc(key: K) -> Self {
        Self::new(key, SortDirection::Asc)
    }

    /// Shorthand for a descending sort.
    pub fn desc(key: K) -> Self {
        Self::new(key, SortDirection::Desc)
    }

    /// Returns the key to sort by, if this sorting reorders records at all.
    pub fn active_key(&self) -> Option<&K> {
        match self.direction {
            SortDirection::None => None,
            SortDirection::Asc | SortDirection::Desc => self.sort_by.as_ref(),
        }
    }
}

// Manual impl: `K` itself need not implement `Default`.
impl<K> Default for Sorting<K> {
    fn default() -> Self {
        Self {
            sort_by: None,
            direction: SortDirection::None,
        }
    }
}

/// Page window over the filtered (and possibly sorted) records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Offset of the first returned record. Defaults to `0`.
    pub from: usize,
    /// Maximum number of returned records. Defaults to [`DEFAULT_PAGE_LIMIT`].
    pub limit: usize,
}

impl Pagination {
    /// Create a page window.
    pub fn new(from: usize, limit: usize) -> Self {
        Self { from, limit }
    }

    /// Index range of this window within a sequence of `len` records, clamped to bounds.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.from.min(len);
        let end = self.from.saturating_add(self.limit).min(len);
        start..end
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            from: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Optional inclusive `[min, max]` bound on a single field.
///
/// An unset side never excludes a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeBound<T> {
    /// Lower bound (inclusive).
    pub min: Option<T>,
    /// Upper bound (inclusive).
    pub max: Option<T>,
}

impl<T> RangeBound<T> {
    /// A bound that accepts every value.
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Create a bound from optional sides.
    pub const fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// Returns `true` if neither side is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

impl<T: PartialOrd> RangeBound<T> {
    /// Returns `true` if `value` is within every configured side.
    pub fn contains(&self, value: &T) -> bool {
        if let Some(min) = &self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = &self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

impl<T> Default for RangeBound<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Output of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult<R> {
    /// The requested page of filtered (and possibly sorted) records.
    pub items: Vec<R>,
    /// Number of records that passed the filter, before pagination.
    pub total: usize,
}

impl<R> QueryResult<R> {
    /// Empty result: no items, zero total.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}
