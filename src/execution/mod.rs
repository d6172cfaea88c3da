//! Execution engine for running the query pipeline with optional parallelism.
//!
//! This module sits "above" [`crate::processing`] and provides:
//!
//! - Parallel filtering and stable parallel sorting for large inputs (via `rayon`)
//! - Cumulative metrics + observer hooks for monitoring
//!
//! The engine's output is always identical to [`crate::processing::run`]: rayon's indexed
//! `collect` keeps input order and `par_sort_by` is stable.

mod observer;

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;

use crate::processing::paginate::paginate_owned;
use crate::processing::sort::comparator;
use crate::processing::{RecordFilter, SortKey};
use crate::types::{Pagination, QueryResult, SortDirection, Sorting};

pub use observer::{QueryEvent, QueryMetrics, QueryMetricsSnapshot, QueryObserver, TracingQueryObserver};

/// Configuration for the [`QueryEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Number of worker threads used for parallel runs.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Inputs with at least this many records are filtered and sorted in parallel.
    ///
    /// Smaller inputs run sequentially on the calling thread.
    pub parallel_threshold: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            num_threads: None,
            parallel_threshold: 16_384,
        }
    }
}

impl ExecutionOptions {
    /// Options that never switch to parallel execution.
    pub fn sequential() -> Self {
        Self {
            num_threads: Some(1),
            parallel_threshold: usize::MAX,
        }
    }
}

/// A configurable engine for running the query pipeline.
///
/// The worker pool is built on the first run that reaches `parallel_threshold`; an engine that
/// only sees smaller inputs never spawns threads.
pub struct QueryEngine {
    pool: OnceLock<Option<ThreadPool>>,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn QueryObserver>>,
    metrics: Arc<QueryMetrics>,
}

impl fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryEngine")
            .field("opts", &self.opts)
            .field("pool_started", &self.pool.get().is_some())
            .field("observer_set", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(ExecutionOptions::default())
    }
}

impl QueryEngine {
    /// Create a new engine with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `num_threads == Some(0)`.
    pub fn new(opts: ExecutionOptions) -> Self {
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        Self {
            pool: OnceLock::new(),
            opts,
            observer: None,
            metrics: Arc::new(QueryMetrics::new()),
        }
    }

    /// Attach an observer for query events.
    pub fn with_observer(mut self, observer: Arc<dyn QueryObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Engine options.
    pub fn options(&self) -> &ExecutionOptions {
        &self.opts
    }

    /// Get a handle to the engine's cumulative metrics.
    pub fn metrics(&self) -> Arc<QueryMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run filter → count → sort → paginate over `records`.
    pub fn run<R, F, K>(
        &self,
        records: &[R],
        filter: &F,
        sorting: &Sorting<K>,
        pagination: &Pagination,
    ) -> QueryResult<R>
    where
        R: Clone + Send + Sync,
        F: RecordFilter<R> + Sync + ?Sized,
        K: SortKey<R> + Sync + fmt::Debug,
    {
        let start = Instant::now();
        let pool = if records.len() >= self.opts.parallel_threshold {
            self.pool()
        } else {
            None
        };
        let parallel = pool.is_some();
        self.emit(QueryEvent::RunStarted {
            input_records: records.len(),
            parallel,
        });

        let mut matched: Vec<R> = if let Some(pool) = pool {
            pool.install(|| {
                records
                    .par_iter()
                    .filter(|record| filter.matches(record))
                    .cloned()
                    .collect()
            })
        } else {
            crate::processing::filter(records, filter)
        };
        let total = matched.len();
        self.emit(QueryEvent::Filtered { total });

        if let Some(key) = sorting.sort_by.as_ref() {
            if let Some(cmp) = comparator(key, sorting.direction) {
                if let Some(pool) = pool {
                    pool.install(|| matched.par_sort_by(cmp));
                } else {
                    matched.sort_by(cmp);
                }
                self.emit(QueryEvent::Sorted {
                    key: format!("{key:?}"),
                    descending: sorting.direction == SortDirection::Desc,
                });
            }
        }

        let items = paginate_owned(matched, pagination);
        self.emit(QueryEvent::Paginated {
            from: pagination.from,
            returned: items.len(),
        });

        let elapsed = start.elapsed();
        self.metrics
            .record_run(parallel, records.len(), total, items.len(), elapsed);
        self.emit(QueryEvent::RunFinished {
            elapsed,
            metrics: self.metrics.snapshot(),
        });

        QueryResult { items, total }
    }

    /// The worker pool, built on first use. `None` if it could not be built.
    fn pool(&self) -> Option<&ThreadPool> {
        self.pool
            .get_or_init(|| {
                let n_threads = self
                    .opts
                    .num_threads
                    .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
                    .max(1);

                match ThreadPoolBuilder::new()
                    .num_threads(n_threads)
                    .thread_name(|i| format!("query-worker-{i}"))
                    .build()
                {
                    Ok(pool) => Some(pool),
                    Err(error) => {
                        tracing::warn!(%error, "failed to build query worker pool; running sequentially");
                        None
                    }
                }
            })
            .as_ref()
    }

    fn emit(&self, event: QueryEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
