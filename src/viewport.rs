//! Responsive breakpoints and an observable viewport.
//!
//! A [`Viewport`] is fed size and scroll notifications by whatever owns the window and tells
//! subscribers about each change. Views subscribe when they mount and unsubscribe when they
//! unmount.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Named width breakpoints, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    Xs,
    Sm,
    Md,
    Slg,
    Lg,
    Xl,
    Xxl,
}

impl Resolution {
    /// Every resolution in ascending order of width.
    pub const ALL: [Self; 7] = [
        Self::Xs,
        Self::Sm,
        Self::Md,
        Self::Slg,
        Self::Lg,
        Self::Xl,
        Self::Xxl,
    ];

    /// Smallest window width (in CSS pixels) at which this resolution applies.
    pub const fn min_width(self) -> u32 {
        match self {
            Self::Xs => 0,
            Self::Sm => 480,
            Self::Md => 720,
            Self::Slg => 960,
            Self::Lg => 1200,
            Self::Xl => 1440,
            Self::Xxl => 1920,
        }
    }

    /// The widest resolution whose minimum width fits in `width`.
    pub fn for_width(width: u32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|r| r.min_width() <= width)
            .unwrap_or(Self::Xxl)
    }
}

/// Window inner size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// Window scroll offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPos {
    pub x: f64,
    pub y: f64,
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Resized {
        size: WindowSize,
        resolution: Resolution,
    },
    Scrolled(ScrollPos),
}

/// Handle returned by [`Viewport::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn(&ViewportEvent) + Send + Sync>;

#[derive(Default)]
struct State {
    size: WindowSize,
    scroll: ScrollPos,
    subscribers: Vec<(SubscriptionId, Callback)>,
}

/// Current window size and scroll position, observable by subscribers.
#[derive(Default)]
pub struct Viewport {
    state: Mutex<State>,
    next_id: AtomicU64,
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Viewport")
            .field("size", &state.size)
            .field("scroll", &state.scroll)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

impl Viewport {
    /// A viewport with zero size.
    pub fn new() -> Self {
        Self::default()
    }

    /// A viewport with an initial size.
    pub fn with_size(width: u32, height: u32) -> Self {
        let viewport = Self::default();
        viewport.lock().size = WindowSize { width, height };
        viewport
    }

    /// Current window size.
    pub fn window_size(&self) -> WindowSize {
        self.lock().size
    }

    /// Current scroll offset.
    pub fn scroll_pos(&self) -> ScrollPos {
        self.lock().scroll
    }

    /// Resolution for the current width.
    pub fn current_resolution(&self) -> Resolution {
        Resolution::for_width(self.lock().size.width)
    }

    /// Returns `true` if the current resolution is within `from..=to`.
    ///
    /// `to = None` means "and everything wider".
    pub fn includes(&self, from: Resolution, to: Option<Resolution>) -> bool {
        let current = self.current_resolution();
        current >= from && current <= to.unwrap_or(Resolution::Xxl)
    }

    /// Record a new window size and notify subscribers.
    pub fn resize(&self, width: u32, height: u32) {
        let size = WindowSize { width, height };
        let event = ViewportEvent::Resized {
            size,
            resolution: Resolution::for_width(width),
        };
        let callbacks = {
            let mut state = self.lock();
            state.size = size;
            Self::callbacks(&state)
        };
        tracing::trace!(width, height, "viewport resized");
        notify(&callbacks, &event);
    }

    /// Record a new scroll offset and notify subscribers.
    pub fn scroll(&self, x: f64, y: f64) {
        let pos = ScrollPos { x, y };
        let callbacks = {
            let mut state = self.lock();
            state.scroll = pos;
            Self::callbacks(&state)
        };
        notify(&callbacks, &ViewportEvent::Scrolled(pos));
    }

    /// Register `callback` for future changes.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ViewportEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.lock().subscribers.push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.lock();
        let before = state.subscribers.len();
        state.subscribers.retain(|(sid, _)| *sid != id);
        state.subscribers.len() != before
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    // Callbacks run outside the lock so they may call back into the viewport.
    fn callbacks(state: &State) -> Vec<Callback> {
        state.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn notify(callbacks: &[Callback], event: &ViewportEvent) {
    for cb in callbacks {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{Resolution, ScrollPos, Viewport, ViewportEvent, WindowSize};

    #[test]
    fn breakpoints_are_inclusive_lower_bounds() {
        assert_eq!(Resolution::for_width(0), Resolution::Xs);
        assert_eq!(Resolution::for_width(479), Resolution::Xs);
        assert_eq!(Resolution::for_width(480), Resolution::Sm);
        assert_eq!(Resolution::for_width(959), Resolution::Md);
        assert_eq!(Resolution::for_width(960), Resolution::Slg);
        assert_eq!(Resolution::for_width(1200), Resolution::Lg);
        assert_eq!(Resolution::for_width(1919), Resolution::Xl);
        assert_eq!(Resolution::for_width(1920), Resolution::Xxl);
        assert_eq!(Resolution::for_width(u32::MAX), Resolution::Xxl);
    }

    #[test]
    fn includes_is_an_inclusive_range() {
        let v = Viewport::with_size(1000, 800);
        assert_eq!(v.current_resolution(), Resolution::Slg);
        assert!(v.includes(Resolution::Slg, Some(Resolution::Slg)));
        assert!(v.includes(Resolution::Md, Some(Resolution::Lg)));
        assert!(v.includes(Resolution::Xs, None));
        assert!(!v.includes(Resolution::Lg, None));
        assert!(!v.includes(Resolution::Xs, Some(Resolution::Md)));
    }

    #[test]
    fn subscribers_see_changes_until_unsubscribed() {
        let v = Viewport::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = v.subscribe(move |e| sink.lock().unwrap().push(*e));
        assert_eq!(v.subscriber_count(), 1);

        v.resize(500, 300);
        v.scroll(0.0, 120.5);
        assert!(v.unsubscribe(id));
        assert!(!v.unsubscribe(id));
        v.resize(2000, 1000);

        let seen = seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                ViewportEvent::Resized {
                    size: WindowSize {
                        width: 500,
                        height: 300
                    },
                    resolution: Resolution::Sm,
                },
                ViewportEvent::Scrolled(ScrollPos { x: 0.0, y: 120.5 }),
            ]
        );
        assert_eq!(v.window_size(), WindowSize { width: 2000, height: 1000 });
        assert_eq!(v.scroll_pos(), ScrollPos { x: 0.0, y: 120.5 });
        assert_eq!(v.current_resolution(), Resolution::Xxl);
    }

    #[test]
    fn callbacks_may_read_the_viewport() {
        let v = Arc::new(Viewport::new());
        let seen = Arc::new(Mutex::new(None));
        let (inner, sink) = (Arc::clone(&v), Arc::clone(&seen));
        v.subscribe(move |_| *sink.lock().unwrap() = Some(inner.current_resolution()));

        v.resize(1500, 900);
        assert_eq!(*seen.lock().unwrap(), Some(Resolution::Xl));
    }
}
