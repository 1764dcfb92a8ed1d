//! Scroll position tracking and scroll locking

use std::sync::Arc;

use shoji_core::{StateCell, StateRegistry};

/// Direction flags derived from consecutive scroll positions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub y: f64,
    pub last_y: f64,
    pub scrolling_up: bool,
    pub scrolling_down: bool,
}

/// Host hook for actually freezing the page while an overlay is open.
pub trait ScrollHost: Send + Sync {
    fn set_locked(&self, locked: bool);
}

/// Scroll position with up/down flags and a reentrant-free lock.
#[derive(Clone)]
pub struct Scroll {
    state: Arc<StateCell<ScrollState>>,
    locked: Arc<StateCell<bool>>,
    host: Option<Arc<dyn ScrollHost>>,
}

impl Scroll {
    pub fn new(registry: &StateRegistry) -> Self {
        Self {
            state: registry.state("ui-scroll", ScrollState::default),
            locked: registry.state("ui-scroll-locked", || false),
            host: None,
        }
    }

    pub fn with_host(mut self, host: Arc<dyn ScrollHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Record a new vertical position. While locked, positions are ignored
    /// so the stored position survives the lock.
    pub fn record(&self, y: f64) {
        if self.locked.get() {
            return;
        }
        self.state.update(|state| {
            state.last_y = state.y;
            state.y = y;
            state.scrolling_up = y < state.last_y;
            state.scrolling_down = y > state.last_y;
        });
    }

    pub fn lock(&self) {
        if !self.locked.get() {
            tracing::debug!("scroll locked");
            self.locked.set(true);
            if let Some(host) = &self.host {
                host.set_locked(true);
            }
        }
    }

    pub fn unlock(&self) {
        if self.locked.get() {
            tracing::debug!("scroll unlocked");
            self.locked.set(false);
            if let Some(host) = &self.host {
                host.set_locked(false);
            }
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    pub fn state(&self) -> ScrollState {
        self.state.get()
    }

    pub fn y(&self) -> f64 {
        self.state.get().y
    }

    /// Observable cell holding the scroll state.
    pub fn cell(&self) -> Arc<StateCell<ScrollState>> {
        Arc::clone(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn direction_flags_follow_movement() {
        let registry = StateRegistry::new();
        let scroll = Scroll::new(&registry);

        scroll.record(100.0);
        assert!(scroll.state().scrolling_down);

        scroll.record(40.0);
        let state = scroll.state();
        assert!(state.scrolling_up);
        assert!(!state.scrolling_down);
        assert_eq!(state.last_y, 100.0);

        scroll.record(40.0);
        let state = scroll.state();
        assert!(!state.scrolling_up);
        assert!(!state.scrolling_down);
    }

    #[test]
    fn lock_freezes_position() {
        let registry = StateRegistry::new();
        let scroll = Scroll::new(&registry);
        scroll.record(250.0);

        scroll.lock();
        scroll.record(0.0);
        assert_eq!(scroll.y(), 250.0);

        scroll.unlock();
        scroll.record(0.0);
        assert_eq!(scroll.y(), 0.0);
    }

    #[test]
    fn host_hook_fires_once_per_transition() {
        struct Counter(AtomicUsize);
        impl ScrollHost for Counter {
            fn set_locked(&self, _locked: bool) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        let registry = StateRegistry::new();
        let host = Arc::new(Counter(AtomicUsize::new(0)));
        let scroll = Scroll::new(&registry).with_host(host.clone());

        scroll.lock();
        scroll.lock();
        scroll.unlock();
        assert_eq!(host.0.load(Ordering::Relaxed), 2);
    }
}
