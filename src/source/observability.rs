use std::fmt;
use std::sync::Arc;

use crate::apartment::ApartmentSortKey;
use crate::error::SourceError;
use crate::types::{Pagination, SortDirection, Sorting};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the load failed).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

impl LoadSeverity {
    /// Severity assigned to a failed load.
    pub fn for_error(error: &SourceError) -> Self {
        match error {
            SourceError::Io(_) => Self::Critical,
            SourceError::Json(e) if e.is_io() => Self::Critical,
            SourceError::Json(_) | SourceError::InvalidPayload { .. } => Self::Error,
        }
    }
}

/// Context about a load attempt: where the listing came from and which page of it was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContext {
    /// Human-readable description of the source (path, endpoint, ...).
    pub source: String,
    /// Requested page window.
    pub pagination: Pagination,
    /// Requested ordering.
    pub sorting: Sorting<ApartmentSortKey>,
    /// `true` if any price, area or room-count filter was set.
    pub filtered: bool,
}

impl LoadContext {
    /// Sort key name for logs, or `"none"` when the listing keeps its source order.
    pub fn sort_label(&self) -> &'static str {
        self.sorting.active_key().map_or("none", |key| key.as_str())
    }

    /// Whether records matching the filters remain after the page described by `stats`.
    pub fn has_more_pages(&self, stats: &LoadStats) -> bool {
        stats.responded && self.pagination.from.saturating_add(stats.returned) < stats.total
    }
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of records the source returned (`0` for an empty response).
    pub fetched: usize,
    /// Number of records matching the filters.
    pub total: usize,
    /// Number of records on the resulting page.
    pub returned: usize,
    /// `false` if the source returned no response at all.
    pub responded: bool,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait LoadObserver: Send + Sync {
    /// Called when a load completes without error (including empty responses).
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &SourceError) {}

    /// Called when a load failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SourceError) {
        self.on_failure(ctx, severity, error);
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SourceError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SourceError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs load events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingLoadObserver;

impl LoadObserver for TracingLoadObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        if stats.responded {
            tracing::info!(
                source = %ctx.source,
                fetched = stats.fetched,
                total = stats.total,
                returned = stats.returned,
                from = ctx.pagination.from,
                sort_by = ctx.sort_label(),
                descending = ctx.sorting.direction == SortDirection::Desc,
                filtered = ctx.filtered,
                more = ctx.has_more_pages(&stats),
                "apartments loaded"
            );
        } else {
            tracing::warn!(source = %ctx.source, "apartments source returned no response");
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SourceError) {
        tracing::error!(
            source = %ctx.source,
            ?severity,
            %error,
            from = ctx.pagination.from,
            sort_by = ctx.sort_label(),
            "apartments load failed"
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &SourceError) {
        tracing::error!(source = %ctx.source, ?severity, %error, alert = true, "apartments load alert");
    }
}
