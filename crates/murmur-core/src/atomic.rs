//! Mutex-guarded shared value.
//!
//! [`Atomic`] serializes every read and write of a long-lived value through
//! one lock. Reads return a snapshot; writes run a closure under the lock,
//! so a read-modify-write sequence can never interleave with another one.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// A value guarded by a mutex.
///
/// A panic inside [`Atomic::mutate`] poisons the lock. The guarded value is
/// still handed out afterwards rather than wedging every later caller.
///
/// # Example
///
/// ```
/// use murmur_core::Atomic;
///
/// let counter = Atomic::new(0u32);
/// let previous = counter.mutate(|value| {
///     let previous = *value;
///     *value += 1;
///     previous
/// });
///
/// assert_eq!(previous, 0);
/// assert_eq!(counter.get(), 1);
/// ```
pub struct Atomic<T> {
    inner: Mutex<T>,
}

impl<T> Atomic<T> {
    /// Wrap `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    fn lock(&self) -> MutexGuard<'_, T> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` with exclusive access and return its result.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock())
    }

    /// Run `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock())
    }

    /// Consume the wrapper and return the value.
    pub fn into_inner(self) -> T {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Atomic<T> {
    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.lock().clone()
    }
}

impl<T: Default> Default for Atomic<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Atomic<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Atomic").field(&*self.lock()).finish()
    }
}
