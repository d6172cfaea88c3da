//! `apartment-catalog` is a small library for querying an in-memory apartment listing: it
//! filters, counts, sorts and paginates records, and ships the client-side helpers that usually
//! sit around such a listing (debounced callbacks, data sources, responsive breakpoints).
//!
//! The primary entrypoint is [`store::ApartmentsStore::load_apartments`], which fetches the full
//! listing from an [`source::ApartmentsSource`] and keeps the requested page plus the filtered
//! total. The pipeline itself is available as [`processing::run`] for any record type.
//!
//! ## Query pipeline
//!
//! A query is four steps, always in this order:
//!
//! 1. **filter**: keep records passing every configured bound (unset bounds never exclude)
//! 2. **count**: `total` is the number of filtered records, independent of pagination
//! 3. **sort**: stable sort by a [`processing::SortKey`], only if a key and direction are set
//! 4. **paginate**: the clamped window `[from, from + limit)`; an offset past the end is empty
//!
//! ```rust
//! use apartment_catalog::apartment::{Apartment, ApartmentSortKey, ApartmentsFilters};
//! use apartment_catalog::processing::run;
//! use apartment_catalog::types::{Pagination, RangeBound, Sorting};
//!
//! let records = vec![
//!     Apartment::new("Loft", 9_500_000, 64.0, 2),
//!     Apartment::new("Studio", 4_100_000, 28.5, 1),
//!     Apartment::new("Family", 12_900_000, 88.0, 3),
//!     Apartment::new("Corner", 7_200_000, 51.0, 2),
//! ];
//!
//! let filters = ApartmentsFilters {
//!     price: RangeBound::new(None, Some(10_000_000)),
//!     rooms_counts: vec![2],
//!     ..Default::default()
//! };
//!
//! let page = run(&records, &filters, &Sorting::asc(ApartmentSortKey::Price), &Pagination::default());
//! assert_eq!(page.total, 2);
//! assert_eq!(page.items[0].name, "Corner");
//! ```
//!
//! Any `Fn(&R) -> bool` is a filter, and any closed enum implementing
//! [`processing::SortKey`] is a sort key, so the pipeline works for other record types too.
//!
//! ## Modules
//!
//! - [`types`]: pagination, sorting, range bounds and query results
//! - [`processing`]: the pure filter/sort/paginate pipeline
//! - [`execution`]: engine running the pipeline with optional parallelism, metrics and observers
//! - [`apartment`]: apartment records, filters and sort keys
//! - [`source`]: data sources (JSON, in-memory) and load observability
//! - [`store`]: the apartments store
//! - [`debounce`]: trailing-edge debounce on tokio timers
//! - [`viewport`]: responsive breakpoints and an observable viewport
//! - [`error`]: error types used by data sources

pub mod apartment;
pub mod debounce;
pub mod error;
pub mod execution;
pub mod processing;
pub mod source;
pub mod store;
pub mod types;
pub mod viewport;

pub use error::{SourceError, SourceResult};
