//! Trailing-edge debounce for bursty calls.
//!
//! A [`Debounced`] wraps an action so that a burst of calls collapses into one execution, run
//! `delay` after the last call of the burst with that call's arguments. Timers run on the tokio
//! runtime that was current when the wrapper was created.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! use apartment_catalog::debounce::debounce;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let search = debounce(move |query: String| sink.lock().unwrap().push(query), Duration::from_millis(300));
//!
//! search.call("ap".to_string());
//! search.call("apar".to_string());
//! search.call("apartment".to_string());
//! tokio::time::sleep(Duration::from_millis(400)).await;
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["apartment".to_string()]);
//! # }
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// The single pending-timer slot of a [`Debounced`].
#[derive(Default)]
struct Slot {
    /// Bumped on every call and cancel; a timer only fires if its generation is still current.
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// A debounced wrapper around an action taking `A`.
///
/// At most one execution is pending per wrapper. Each [`call`](Self::call) cancels the pending
/// execution (if any) and schedules a new one; if no further call arrives, the action runs exactly
/// once, `delay` after the last call.
///
/// Dropping the wrapper does not cancel a pending execution; use [`cancel`](Self::cancel) for that.
pub struct Debounced<A> {
    action: Arc<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    runtime: Handle,
    slot: Arc<Mutex<Slot>>,
}

impl<A: Send + 'static> Debounced<A> {
    /// Wrap `action` with a quiet period of `delay`, using the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a tokio runtime.
    pub fn new<F>(action: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::with_runtime(action, delay, Handle::current())
    }

    /// Wrap `action` with a quiet period of `delay`, scheduling timers on `runtime`.
    pub fn with_runtime<F>(action: F, delay: Duration, runtime: Handle) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            action: Arc::new(action),
            delay,
            runtime,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Quiet period after which a pending call runs.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule the action with `args`, replacing any pending execution.
    pub fn call(&self, args: A) {
        let deadline = Instant::now() + self.delay;
        let mut slot = self.lock_slot();

        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;
        if let Some(previous) = slot.pending.take() {
            previous.abort();
            tracing::trace!(generation, "debounce: rescheduled pending call");
        }

        let action = Arc::clone(&self.action);
        let shared = Arc::clone(&self.slot);
        slot.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            {
                let mut slot = match shared.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                // A newer call or a cancel won the race against this timer.
                if slot.generation != generation {
                    return;
                }
                slot.pending = None;
            }
            tracing::trace!(generation, "debounce: firing");
            action(args);
        }));
    }

    /// Cancel the pending execution, if any. Returns `true` if one was cancelled.
    pub fn cancel(&self) -> bool {
        let mut slot = self.lock_slot();
        slot.generation = slot.generation.wrapping_add(1);
        match slot.pending.take() {
            Some(pending) => {
                pending.abort();
                tracing::trace!("debounce: cancelled pending call");
                true
            }
            None => false,
        }
    }

    /// Returns `true` while an execution is scheduled and has not started yet.
    pub fn is_pending(&self) -> bool {
        self.lock_slot().pending.is_some()
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Slot> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// Wrap `action` so that only the last call within `delay` of quiet runs.
///
/// Shorthand for [`Debounced::new`].
///
/// # Panics
///
/// Panics if called outside the context of a tokio runtime.
pub fn debounce<A, F>(action: F, delay: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced::new(action, delay)
}
