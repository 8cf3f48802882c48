//! `Shared<T>` — a read-mostly, copy-on-write configuration cell.
//!
//! Readers take an immutable `Arc` snapshot and compute against it with
//! no further coordination; writers build a replacement value off to
//! the side and install it atomically under a mutex.  A reader mid-way
//! through a computation keeps the snapshot it started with, so it can
//! never observe a half-applied mutation.

use std::sync::{Arc, Mutex};

use crate::errors::Result;

/// A shared value replaced wholesale on every mutation.
///
/// Cheap to clone: clones share the same cell, so a mutation through
/// one clone is visible to snapshots taken through any other.
#[derive(Debug)]
pub struct Shared<T> {
    inner: Mutex<Arc<T>>,
}

impl<T> Shared<T> {
    /// Wrap `value` in a new cell.
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Arc::new(value)),
        }
    }

    /// Return the current snapshot.
    pub fn snapshot(&self) -> Arc<T> {
        self.inner.lock().expect("Shared mutex poisoned").clone()
    }

    /// Replace the value with the result of `f(current)`.
    ///
    /// Writers are serialized on the cell's mutex.  If `f` fails,
    /// nothing is installed and the prior value remains in effect.
    pub fn try_update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&T) -> Result<T>,
    {
        let mut guard = self.inner.lock().expect("Shared mutex poisoned");
        let next = f(guard.as_ref())?;
        *guard = Arc::new(next);
        Ok(())
    }

    /// Replace the value with the result of an infallible `f(current)`.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let mut guard = self.inner.lock().expect("Shared mutex poisoned");
        *guard = Arc::new(f(guard.as_ref()));
    }

    /// Replace the value unconditionally.
    pub fn store(&self, value: T) {
        *self.inner.lock().expect("Shared mutex poisoned") = Arc::new(value);
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
