//! The in-memory query pipeline: filter → count → sort → paginate.
//!
//! The pipeline is a pure function of its inputs. Order matters: `total` is taken after filtering
//! and before pagination, so it always reflects every matching record.
//!
//! - [`filter()`]: stable single-pass filtering by a [`RecordFilter`]
//! - [`sort()`]: stable sort by a [`SortKey`] (skipped when no key/direction is set)
//! - [`paginate()`]: clamped `[from, from + limit)` window
//! - [`run()`]: all of the above, producing a [`QueryResult`]
//!
//! ## Example
//!
//! ```rust
//! use apartment_catalog::apartment::{Apartment, ApartmentSortKey, ApartmentsFilters};
//! use apartment_catalog::processing::run;
//! use apartment_catalog::types::{Pagination, Sorting};
//!
//! let records = vec![
//!     Apartment::new("a", 100, 40.0, 2),
//!     Apartment::new("b", 200, 60.0, 3),
//!     Apartment::new("c", 150, 50.0, 2),
//! ];
//! let filters = ApartmentsFilters {
//!     rooms_counts: vec![2],
//!     ..Default::default()
//! };
//!
//! let result = run(
//!     &records,
//!     &filters,
//!     &Sorting::asc(ApartmentSortKey::Price),
//!     &Pagination::new(0, 10),
//! );
//!
//! assert_eq!(result.total, 2);
//! let prices: Vec<u64> = result.items.iter().map(|a| a.price).collect();
//! assert_eq!(prices, vec![100, 150]);
//! ```

pub mod filter;
pub mod paginate;
pub mod sort;

pub use filter::{filter, KeepAll, RecordFilter};
pub use paginate::paginate;
pub use sort::{sort, SortKey};

use crate::types::{Pagination, QueryResult, Sorting};

/// Run the full pipeline over `records`.
pub fn run<R, F, K>(
    records: &[R],
    filter: &F,
    sorting: &Sorting<K>,
    pagination: &Pagination,
) -> QueryResult<R>
where
    R: Clone,
    F: RecordFilter<R> + ?Sized,
    K: SortKey<R> + Sync,
{
    let mut matched = self::filter(records, filter);
    let total = matched.len();
    self::sort(&mut matched, sorting);
    QueryResult {
        items: paginate::paginate_owned(matched, pagination),
        total,
    }
}
