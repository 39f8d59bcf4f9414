// ABOUTME: Observable state container — a value plus an ordered list of change callbacks.
// ABOUTME: Every set() stores the value first, then notifies subscribers synchronously in order.

use std::sync::{Arc, Mutex, MutexGuard};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// A mutable value that pushes every change to its subscribers.
///
/// Callbacks run on the thread that called `set`, after the new value is
/// visible through `get`, and before `set` returns. Mutations from different
/// threads are serialized through notification, so subscribers see values in
/// the order they were applied and the last value delivered is the stored one.
///
/// The subscriber list is snapshotted before dispatch, so a callback may read
/// the value, subscribe, or unsubscribe; list changes take effect from the
/// next mutation. A callback must not mutate the observable that invoked it.
pub struct Observable<T> {
    value: Mutex<T>,
    subscribers: Mutex<Subscribers<T>>,
    // Held from mutation until the last callback returns.
    dispatch: Mutex<()>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            subscribers: Mutex::new(Subscribers {
                next_id: 0,
                entries: Vec::new(),
            }),
            dispatch: Mutex::new(()),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        lock(&self.value).clone()
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        let _dispatch = lock(&self.dispatch);
        let snapshot = {
            let mut guard = lock(&self.value);
            *guard = value;
            guard.clone()
        };
        self.notify(&snapshot);
    }

    /// Mutate the value in place and notify subscribers. Returns what `f` returns.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let _dispatch = lock(&self.dispatch);
        let (result, snapshot) = {
            let mut guard = lock(&self.value);
            let result = f(&mut guard);
            (result, guard.clone())
        };
        self.notify(&snapshot);
        result
    }

    /// Register a callback invoked on every subsequent mutation.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let mut subs = lock(&self.subscribers);
        let id = subs.next_id;
        subs.next_id += 1;
        subs.entries.push((id, Arc::new(callback)));
        Subscription(id)
    }

    /// Remove a callback. Unknown or already-removed handles are ignored.
    pub fn unsubscribe(&self, subscription: Subscription) {
        lock(&self.subscribers)
            .entries
            .retain(|(id, _)| *id != subscription.0);
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).entries.len()
    }

    fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = lock(&self.subscribers)
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Lock a mutex, recovering the data if a subscriber panicked while holding it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
