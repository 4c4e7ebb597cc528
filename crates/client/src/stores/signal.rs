//! Synchronous observer registry.
//!
//! Replaces reactive stream plumbing with the smallest thing that works: a
//! store owns a [`Subscribers`] list, and every mutation notifies registered
//! observers synchronously, in registration order, before the mutating call
//! returns. Observers live for the life of the store.

use std::sync::{Mutex, MutexGuard, PoisonError};

type Listener<T> = Box<dyn Fn(&T) + Send>;

/// A list of observers notified with a snapshot of store state.
pub struct Subscribers<T> {
    listeners: Mutex<Vec<Listener<T>>>,
}

impl<T> Subscribers<T> {
    /// Create an empty subscriber list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer. There is no unsubscription; observers are
    /// dropped with the store.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + 'static) {
        self.locked().push(Box::new(listener));
    }

    /// Notify every observer, synchronously and in registration order.
    pub fn notify(&self, value: &T) {
        for listener in self.locked().iter() {
            listener(value);
        }
    }

    fn locked(&self) -> MutexGuard<'_, Vec<Listener<T>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.locked().len())
            .finish()
    }
}
