//! The process-wide method registry and ancestor-chain (MRO) table (§4.3).

use std::sync::atomic::{AtomicU64, Ordering};

use ruby_values::{no_method_error, MethodKey, RubyResult, Value};
use rustc_hash::FxHashMap;

use crate::method_impl::MethodImpl;

/// A registry slot: the current implementation plus the generation it was last (re-)registered
/// at. The generation is how the inline cache's lazy invalidation (§9's Open Classes design note)
/// detects a stale cached `impl` without needing back-references from methods to call-sites.
#[derive(Clone)]
struct Slot {
    imp: MethodImpl,
    generation: u64,
}

/// `class-name → (method-name → impl)`, plus each class's immutable ancestor chain.
///
/// Registration is additive: re-registering `(class, method)` replaces the prior entry and bumps
/// that slot's generation, which is how open-class redefinition becomes observable to inline
/// caches without an eager flush.
pub struct MethodRegistry {
    methods: FxHashMap<MethodKey, Slot>,
    ancestors: FxHashMap<&'static str, Vec<&'static str>>,
    generation_counter: AtomicU64,
}

impl MethodRegistry {
    pub fn empty() -> Self {
        MethodRegistry {
            methods: FxHashMap::default(),
            ancestors: FxHashMap::default(),
            generation_counter: AtomicU64::new(0),
        }
    }

    /// Register or replace `(class, method)`. Returns the new generation.
    pub fn register(&mut self, class: &'static str, method: &'static str, imp: MethodImpl) -> u64 {
        let key = MethodKey::of(class, method);
        let generation = self.generation_counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.methods.insert(key, Slot { imp, generation });
        generation
    }

    /// Establish (or replace) a class's ancestor chain, e.g. `class Foo < Bar; include Baz; end`
    /// composing `[Foo, Baz, Bar, ...Bar's chain]` per §4.3's MRO composition rule. Replacing an
    /// existing chain does not mutate previously-handed-out `Vec` snapshots (§3's "Ancestor lists
    /// are immutable once assigned").
    pub fn register_ancestors(&mut self, class: &'static str, chain: Vec<&'static str>) {
        self.ancestors.insert(class, chain);
    }

    /// The ancestor chain for a class: the explicitly registered chain if one exists (covers
    /// user-defined classes and any built-in class extended via open classes), otherwise `None`
    /// (the caller falls back to `Value::default_ancestors`).
    pub fn ancestors_for(&self, class: &'static str) -> Option<&[&'static str]> {
        self.ancestors.get(class).map(Vec::as_slice)
    }

    fn ancestors(&self, value: &Value) -> Vec<&'static str> {
        self.ancestors_for(value.class_name())
            .map(<[&str]>::to_vec)
            .unwrap_or_else(|| value.default_ancestors())
    }

    /// `lookup(value, name) -> impl | nil`: walk `value`'s ancestor chain, returning the first
    /// match plus the generation it was registered at.
    fn lookup_slot(&self, value: &Value, method_name: &str) -> Option<(&MethodImpl, u64)> {
        let method_name = ruby_ir::intern(method_name);
        for class in self.ancestors(value) {
            let key = MethodKey::new(ruby_ir::intern(class), method_name);
            if let Some(slot) = self.methods.get(&key) {
                return Some((&slot.imp, slot.generation));
            }
        }
        None
    }

    pub fn lookup(&self, value: &Value, method_name: &str) -> Option<(MethodImpl, u64)> {
        self.lookup_slot(value, method_name)
            .map(|(imp, gen)| (imp.clone(), gen))
    }

    /// The generation currently on file for `(class, method)`, used by the dispatch engine to
    /// cheaply detect a stale inline-cache entry without re-walking the ancestor chain.
    pub fn current_generation(&self, class: &str, method_name: &str) -> Option<u64> {
        let key = MethodKey::of(class, method_name);
        self.methods.get(&key).map(|slot| slot.generation)
    }

    /// `call(value, name, args…) -> value`: raises `NoMethodError` when `lookup` fails.
    pub fn call(&self, value: &Value, method_name: &str, args: &[Value]) -> RubyResult<Value> {
        match self.lookup_slot(value, method_name) {
            Some((imp, _)) => imp.call(value, args),
            None => Err(no_method_error(value.class_name(), method_name, args.len())),
        }
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ruby_values::ScalarInt;

    use super::*;

    fn noop(_: &Value, _: &[Value]) -> RubyResult<Value> {
        Ok(Value::Nil)
    }

    #[test]
    fn lookup_walks_ancestor_chain_in_order() {
        let mut registry = MethodRegistry::empty();
        registry.register("Object", "greet", MethodImpl::builtin(noop));
        let hit = registry.lookup(&Value::Integer(ScalarInt::ZERO), "greet");
        assert!(hit.is_some());
    }

    #[test]
    fn method_on_subclass_shadows_same_named_method_on_object() {
        fn object_impl(_: &Value, _: &[Value]) -> RubyResult<Value> {
            Ok(Value::Bool(false))
        }
        fn integer_impl(_: &Value, _: &[Value]) -> RubyResult<Value> {
            Ok(Value::Bool(true))
        }
        let mut registry = MethodRegistry::empty();
        registry.register("Object", "shared", MethodImpl::builtin(object_impl));
        registry.register("Integer", "shared", MethodImpl::builtin(integer_impl));

        let result = registry
            .call(&Value::Integer(ScalarInt::ZERO), "shared", &[])
            .unwrap();
        assert!(matches!(result, Value::Bool(true)));
    }

    #[test]
    fn missing_method_raises_no_method_error() {
        let registry = MethodRegistry::empty();
        let err = registry.call(&Value::Nil, "frobnicate", &[]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("frobnicate"));
    }

    #[test]
    fn re_registering_bumps_the_generation() {
        let mut registry = MethodRegistry::empty();
        let first = registry.register("Integer", "double", MethodImpl::builtin(noop));
        let second = registry.register("Integer", "double", MethodImpl::builtin(noop));
        assert!(second > first);
        assert_eq!(
            registry.current_generation("Integer", "double"),
            Some(second)
        );
    }
}
