//! `Heap<T>`: the shared-ownership wrapper for Ruby's mutable, reference-semantic values.
//!
//! Ruby arrays, hashes, strings, and objects are reference types: assignment aliases the same
//! underlying object, and mutation through one reference is visible through another. `Heap<T>`
//! wraps `Arc<RwLock<T>>` behind a constructor so call sites never reach for `Arc`/`RwLock`
//! directly, matching the registry's `SharedMutableRegistry` pattern.

#![expect(
    clippy::disallowed_types,
    reason = "Arc<RwLock<_>> is the implementation Heap<T> exists to hide"
)]

use std::sync::Arc;

use parking_lot::RwLock;

/// A heap-allocated, shared, mutable Ruby value payload.
///
/// Two `Heap<T>` clones refer to the same underlying object (`object_id` identity); mutating
/// through one is visible through the other, matching Ruby reference semantics for `Array`,
/// `Hash`, `String`, and user objects.
pub struct Heap<T>(Arc<RwLock<T>>);

impl<T> Heap<T> {
    /// The only way to construct a `Heap<T>`: wraps a freshly built value.
    pub fn new(value: T) -> Self {
        Heap(Arc::new(RwLock::new(value)))
    }

    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, T> {
        self.0.read()
    }

    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Identity: two `Heap<T>` values are `equal?` iff they point at the same allocation.
    pub fn ptr_eq(&self, other: &Heap<T>) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// A stable identity integer, for `object_id`.
    pub fn object_id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl<T: Clone> Heap<T> {
    /// Snapshot the current value (used by `dup`-style copying methods).
    pub fn snapshot(&self) -> T {
        self.0.read().clone()
    }
}

impl<T> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heap({:?})", self.0.read())
    }
}

use std::fmt;
