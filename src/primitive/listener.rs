//! Single-closure callback slots

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Holds at most one callback; setting replaces, it never chains
///
/// Callers clone the callback out with [`Listener::get`] and invoke it after
/// releasing any lock of their own.
pub struct Listener<F: ?Sized> {
    slot: RwLock<Option<Arc<F>>>,
}

impl<F: ?Sized> Listener<F> {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Install `f`, replacing any previous callback
    pub fn set(&self, f: Arc<F>) {
        *self.slot.write() = Some(f);
    }

    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    /// The current callback, if any
    pub fn get(&self) -> Option<Arc<F>> {
        self.slot.read().clone()
    }

    pub fn is_set(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl<F: ?Sized> Default for Listener<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for Listener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("set", &self.is_set())
            .finish()
    }
}
