//! Keyed shared state with subscribers
//!
//! Configuration state, overlay lists and viewport trackers are session-wide
//! singletons keyed by name. Instead of ambient globals, feature modules are
//! handed a [`StateRegistry`] at construction so tests can instantiate an
//! isolated registry per case.

use std::any::Any;
use std::sync::{Arc, Mutex, RwLock};

use rustc_hash::FxHashMap;

/// Handle returned by [`StateCell::subscribe`], usable to detach the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(usize);

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A single shared value with change observers.
pub struct StateCell<T> {
    value: RwLock<T>,
    observers: Mutex<Vec<(usize, Observer<T>)>>,
    next_observer: Mutex<usize>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            observers: Mutex::new(Vec::new()),
            next_observer: Mutex::new(0),
        }
    }

    /// Current value (cloned).
    pub fn get(&self) -> T {
        self.value.read().unwrap().clone()
    }

    /// Read through a borrow without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read().unwrap())
    }

    /// Replace the value and notify observers.
    pub fn set(&self, value: T) {
        *self.value.write().unwrap() = value;
        self.notify();
    }

    /// Mutate the value in place and notify observers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut guard = self.value.write().unwrap();
            f(&mut guard);
        }
        self.notify();
    }

    /// Register a change observer. The callback runs after every `set`/`update`
    /// with the new value, on the mutating caller's thread. Observers may call
    /// `subscribe`/`unsubscribe` on the same cell from inside the callback.
    pub fn subscribe(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let mut next = self.next_observer.lock().unwrap();
        let id = *next;
        *next += 1;
        self.observers.lock().unwrap().push((id, Arc::new(observer)));
        Subscription(id)
    }

    /// Detach a previously registered observer. Unknown handles are ignored.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.observers.lock().unwrap().retain(|(id, _)| *id != subscription.0);
    }

    fn notify(&self) {
        let value = self.value.read().unwrap().clone();
        // Snapshot so callbacks run without the observers lock held; a
        // callback may subscribe or unsubscribe on this same cell.
        let observers: Vec<Observer<T>> = self
            .observers
            .lock()
            .unwrap()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(&value);
        }
    }
}

/// Keyed, lazily-initialized registry of [`StateCell`]s.
///
/// Cells are created on first access and shared by every subsequent caller of
/// the same key. Reusing a key with a different value type is a programmer
/// error and panics.
#[derive(Default)]
pub struct StateRegistry {
    cells: RwLock<FxHashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl StateRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fetch the cell registered under `key`, creating it with `init` on first
    /// use.
    pub fn state<T>(&self, key: &str, init: impl FnOnce() -> T) -> Arc<StateCell<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        if let Some(existing) = self.cells.read().unwrap().get(key) {
            return Arc::clone(existing)
                .downcast::<StateCell<T>>()
                .unwrap_or_else(|_| panic!("state key {key:?} reused with a different type"));
        }

        let mut cells = self.cells.write().unwrap();
        // Racing creators resolve to whichever cell landed first.
        let entry = cells.entry(key.to_string()).or_insert_with(|| {
            tracing::trace!(key, "state cell created");
            Arc::new(StateCell::new(init()))
        });
        Arc::clone(entry)
            .downcast::<StateCell<T>>()
            .unwrap_or_else(|_| panic!("state key {key:?} reused with a different type"))
    }

    /// Whether a cell exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.cells.read().unwrap().contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn cell_set_and_get() {
        let cell = StateCell::new(1u32);
        assert_eq!(cell.get(), 1);
        cell.set(5);
        assert_eq!(cell.get(), 5);
        cell.update(|v| *v += 1);
        assert_eq!(cell.get(), 6);
    }

    #[test]
    fn observers_fire_on_change() {
        let cell = StateCell::new(0u32);
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        let sub = cell.subscribe(move |v| {
            seen_clone.store(*v as usize, Ordering::SeqCst);
        });

        cell.set(7);
        assert_eq!(seen.load(Ordering::SeqCst), 7);

        cell.unsubscribe(sub);
        cell.set(9);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn observer_may_unsubscribe_itself() {
        let cell = Arc::new(StateCell::new(0u32));
        let fired = Arc::new(AtomicUsize::new(0));
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let cell_in = Arc::clone(&cell);
        let fired_in = Arc::clone(&fired);
        let slot_in = Arc::clone(&slot);
        let sub = cell.subscribe(move |_| {
            fired_in.fetch_add(1, Ordering::SeqCst);
            if let Some(sub) = slot_in.lock().unwrap().take() {
                cell_in.unsubscribe(sub);
            }
        });
        *slot.lock().unwrap() = Some(sub);

        cell.set(1);
        cell.set(2);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn observer_may_subscribe_another() {
        let cell = Arc::new(StateCell::new(0u32));
        let late = Arc::new(AtomicUsize::new(0));

        let cell_in = Arc::clone(&cell);
        let late_in = Arc::clone(&late);
        let _sub = cell.subscribe(move |_| {
            let late_cb = Arc::clone(&late_in);
            cell_in.subscribe(move |v| {
                late_cb.store(*v as usize, Ordering::SeqCst);
            });
        });

        cell.set(1);
        assert_eq!(late.load(Ordering::SeqCst), 0);
        cell.set(2);
        assert_eq!(late.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn registry_returns_same_cell() {
        let registry = StateRegistry::new();
        let a = registry.state("count", || 0u32);
        let b = registry.state("count", || 99u32);
        a.set(3);
        assert_eq!(b.get(), 3);
        assert!(registry.contains("count"));
        assert!(!registry.contains("other"));
    }

    #[test]
    #[should_panic(expected = "reused with a different type")]
    fn registry_rejects_type_mismatch() {
        let registry = StateRegistry::new();
        let _ = registry.state("key", || 0u32);
        let _ = registry.state("key", || String::new());
    }
}
