extern crate alloc;

use alloc::sync::Arc;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::id::HandId;

#[cfg(feature = "std")]
pub struct Mutex<T>(std::sync::Mutex<T>);

#[cfg(feature = "std")]
impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Self(std::sync::Mutex::new(value))
    }

    pub fn lock(&self) -> std::sync::MutexGuard<'_, T> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub use spin::Mutex;

/// One mutex per hand id, so that mutations of the same hand never overlap.
#[derive(Default)]
pub struct HandLocks {
    locks: Mutex<HashMap<HandId, Arc<Mutex<()>>>>,
}

impl HandLocks {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `f` while holding the lock of `hand_id`.
    pub fn with<T>(&self, hand_id: HandId, f: impl FnOnce() -> T) -> T {
        let lock = Arc::clone(self.locks.lock().entry(hand_id).or_default());
        let _guard = lock.lock();
        f()
    }

    /// Drops the lock entry of a finished hand.
    ///
    /// Callers still queued on the old entry re-read the hand and find it
    /// finished, so a fresh entry racing with them cannot mutate anything.
    pub fn release(&self, hand_id: HandId) {
        self.locks.lock().remove(&hand_id);
    }

    /// Number of hands holding a lock entry.
    #[cfg(test)]
    pub fn entries(&self) -> usize {
        self.locks.lock().len()
    }
}

#[cfg(feature = "std")]
impl<T: Default> Default for Mutex<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
