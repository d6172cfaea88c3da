//! Apartments store: loads listings from a source and keeps the current page.
//!
//! ```rust
//! use apartment_catalog::apartment::{Apartment, ApartmentSortKey, ApartmentsFilters};
//! use apartment_catalog::source::StaticSource;
//! use apartment_catalog::store::ApartmentsStore;
//! use apartment_catalog::types::{Pagination, Sorting};
//!
//! # fn main() -> Result<(), apartment_catalog::SourceError> {
//! let source = StaticSource::new(vec![
//!     Apartment::new("a", 100, 40.0, 2),
//!     Apartment::new("b", 200, 60.0, 3),
//!     Apartment::new("c", 150, 50.0, 2),
//! ]);
//! let mut store = ApartmentsStore::default();
//!
//! let loaded = store.load_apartments(
//!     &source,
//!     &Pagination::new(0, 1),
//!     &Sorting::desc(ApartmentSortKey::Area),
//!     &ApartmentsFilters::default(),
//! )?;
//!
//! assert!(loaded);
//! assert_eq!(store.total(), 3);
//! assert_eq!(store.apartments()[0].name, "b");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::apartment::{Apartment, ApartmentSortKey, ApartmentsFilters};
use crate::error::SourceResult;
use crate::execution::{ExecutionOptions, QueryEngine};
use crate::source::{ApartmentsSource, LoadContext, LoadObserver, LoadSeverity, LoadStats};
use crate::types::{Pagination, Sorting};

/// Options controlling an [`ApartmentsStore`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct StoreOptions {
    /// Options for the engine that runs the query pipeline.
    pub execution: ExecutionOptions,
    /// Optional observer for load outcomes.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("execution", &self.execution)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            execution: ExecutionOptions::default(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Holds the currently loaded page of apartments and the filtered total.
pub struct ApartmentsStore {
    apartments: Vec<Apartment>,
    total: usize,
    engine: QueryEngine,
    observer: Option<Arc<dyn LoadObserver>>,
    alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for ApartmentsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApartmentsStore")
            .field("apartments_len", &self.apartments.len())
            .field("total", &self.total)
            .field("engine", &self.engine)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ApartmentsStore {
    fn default() -> Self {
        Self::new(StoreOptions::default())
    }
}

impl ApartmentsStore {
    /// Create an empty store.
    pub fn new(options: StoreOptions) -> Self {
        Self {
            apartments: Vec::new(),
            total: 0,
            engine: QueryEngine::new(options.execution),
            observer: options.observer,
            alert_at_or_above: options.alert_at_or_above,
        }
    }

    /// The current page of apartments.
    pub fn apartments(&self) -> &[Apartment] {
        &self.apartments
    }

    /// Number of apartments matching the last applied filters.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The engine used to run queries (for metrics).
    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// Fetch the listing from `source`, then filter, sort and paginate it into the store.
    ///
    /// Returns `Ok(false)` and leaves the store untouched if the source gave no response.
    /// Fetch errors are returned as-is and also leave the store untouched.
    pub fn load_apartments<S>(
        &mut self,
        source: &S,
        pagination: &Pagination,
        sorting: &Sorting<ApartmentSortKey>,
        filters: &ApartmentsFilters,
    ) -> SourceResult<bool>
    where
        S: ApartmentsSource + ?Sized,
    {
        let ctx = LoadContext {
            source: source.describe(),
            pagination: *pagination,
            sorting: *sorting,
            filtered: !filters.is_empty(),
        };

        let response = match source.fetch() {
            Ok(response) => response,
            Err(e) => {
                if let Some(obs) = self.observer.as_ref() {
                    let sev = LoadSeverity::for_error(&e);
                    obs.on_failure(&ctx, sev, &e);
                    if sev >= self.alert_at_or_above {
                        obs.on_alert(&ctx, sev, &e);
                    }
                }
                return Err(e);
            }
        };

        let Some(records) = response else {
            tracing::debug!(source = %ctx.source, "no response; keeping current apartments");
            self.report_success(
                &ctx,
                LoadStats {
                    fetched: 0,
                    total: self.total,
                    returned: self.apartments.len(),
                    responded: false,
                },
            );
            return Ok(false);
        };

        let result = self.engine.run(&records, filters, sorting, pagination);
        self.report_success(
            &ctx,
            LoadStats {
                fetched: records.len(),
                total: result.total,
                returned: result.items.len(),
                responded: true,
            },
        );

        self.apartments = result.items;
        self.total = result.total;
        Ok(true)
    }

    /// [`Self::load_apartments`] with default pagination, no sorting and no filters.
    pub fn load_with_defaults<S>(&mut self, source: &S) -> SourceResult<bool>
    where
        S: ApartmentsSource + ?Sized,
    {
        self.load_apartments(
            source,
            &Pagination::default(),
            &Sorting::default(),
            &ApartmentsFilters::default(),
        )
    }

    fn report_success(&self, ctx: &LoadContext, stats: LoadStats) {
        if let Some(obs) = self.observer.as_ref() {
            obs.on_success(ctx, stats);
        }
    }
}
