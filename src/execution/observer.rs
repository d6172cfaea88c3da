use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Events emitted by the [`super::QueryEngine`] during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEvent {
    RunStarted { input_records: usize, parallel: bool },
    Filtered { total: usize },
    Sorted { key: String, descending: bool },
    Paginated { from: usize, returned: usize },
    RunFinished {
        elapsed: Duration,
        metrics: QueryMetricsSnapshot,
    },
}

/// Observer hook for query events.
pub trait QueryObserver: Send + Sync {
    fn on_event(&self, event: &QueryEvent);
}

/// Forwards query events to `tracing`.
///
/// Run boundaries are logged at `debug`, intermediate steps at `trace`.
#[derive(Debug, Default)]
pub struct TracingQueryObserver;

impl QueryObserver for TracingQueryObserver {
    fn on_event(&self, event: &QueryEvent) {
        match event {
            QueryEvent::RunStarted {
                input_records,
                parallel,
            } => tracing::debug!(input_records, parallel, "query run started"),
            QueryEvent::RunFinished { elapsed, metrics } => {
                tracing::debug!(?elapsed, %metrics, "query run finished");
            }
            other => tracing::trace!(event = ?other, "query step"),
        }
    }
}

/// Cumulative counters across every run of an engine.
///
/// Updated by the engine; callers can snapshot them at any time.
#[derive(Debug, Default)]
pub struct QueryMetrics {
    runs: AtomicU64,
    parallel_runs: AtomicU64,
    records_scanned: AtomicU64,
    records_matched: AtomicU64,
    records_returned: AtomicU64,
    last_elapsed_ns: AtomicU64,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_run(
        &self,
        parallel: bool,
        scanned: usize,
        matched: usize,
        returned: usize,
        elapsed: Duration,
    ) {
        let _ = self.runs.fetch_add(1, Ordering::SeqCst);
        if parallel {
            let _ = self.parallel_runs.fetch_add(1, Ordering::SeqCst);
        }
        let _ = self.records_scanned.fetch_add(scanned as u64, Ordering::SeqCst);
        let _ = self.records_matched.fetch_add(matched as u64, Ordering::SeqCst);
        let _ = self
            .records_returned
            .fetch_add(returned as u64, Ordering::SeqCst);
        self.last_elapsed_ns.store(
            elapsed.as_nanos().min(u64::MAX as u128) as u64,
            Ordering::SeqCst,
        );
    }

    pub fn snapshot(&self) -> QueryMetricsSnapshot {
        QueryMetricsSnapshot {
            runs: self.runs.load(Ordering::SeqCst),
            parallel_runs: self.parallel_runs.load(Ordering::SeqCst),
            records_scanned: self.records_scanned.load(Ordering::SeqCst),
            records_matched: self.records_matched.load(Ordering::SeqCst),
            records_returned: self.records_returned.load(Ordering::SeqCst),
            last_elapsed: Duration::from_nanos(self.last_elapsed_ns.load(Ordering::SeqCst)),
        }
    }
}

/// Immutable snapshot of [`QueryMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMetricsSnapshot {
    pub runs: u64,
    pub parallel_runs: u64,
    pub records_scanned: u64,
    pub records_matched: u64,
    pub records_returned: u64,
    pub last_elapsed: Duration,
}

impl fmt::Display for QueryMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "runs={} (parallel={}), scanned={}, matched={}, returned={}, last_elapsed={:?}",
            self.runs,
            self.parallel_runs,
            self.records_scanned,
            self.records_matched,
            self.records_returned,
            self.last_elapsed
        )
    }
}
