//! Shared-ownership newtypes for registries.
//!
//! These wrap `Arc`/`Arc<RwLock<_>>` so the rest of the crate never reaches for those types
//! directly (`#[expect(clippy::disallowed_types, ...)]` below is the single sanctioned escape
//! hatch), keeping "who can mutate this" auditable at a glance.

#![expect(
    clippy::disallowed_types,
    reason = "Arc/Arc<RwLock<_>> are the implementation these newtypes exist to hide"
)]

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An immutable, cheaply-cloned shared value. Used for read-only snapshots (e.g. a frozen
/// ancestor chain) that never change after construction.
#[derive(Debug)]
pub struct SharedRegistry<T>(Arc<T>);

impl<T> SharedRegistry<T> {
    pub fn new(value: T) -> Self {
        SharedRegistry(Arc::new(value))
    }
}

impl<T> Clone for SharedRegistry<T> {
    fn clone(&self) -> Self {
        SharedRegistry(Arc::clone(&self.0))
    }
}

impl<T> std::ops::Deref for SharedRegistry<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// A shared value guarded by a single writer lock: the method registry and IC table pattern from
/// §5 — "readers see a consistent snapshot", "guarded by a single writer lock if the host is
/// multi-threaded".
#[derive(Debug)]
pub struct SharedMutableRegistry<T>(Arc<RwLock<T>>);

impl<T> SharedMutableRegistry<T> {
    pub fn new(value: T) -> Self {
        SharedMutableRegistry(Arc::new(RwLock::new(value)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }
}

impl<T> Clone for SharedMutableRegistry<T> {
    fn clone(&self) -> Self {
        SharedMutableRegistry(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for SharedMutableRegistry<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn shared_mutable_registry_clones_see_writes() {
        let registry: SharedMutableRegistry<Vec<i32>> = SharedMutableRegistry::new(Vec::new());
        let clone = registry.clone();
        clone.write().push(1);
        assert_eq!(registry.read().len(), 1);
    }
}
