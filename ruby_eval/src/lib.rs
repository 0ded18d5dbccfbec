//! The Ruby evaluation core: method registry + MRO, inline cache, and dispatch engine (§2).
//!
//! This crate is the dispatch surface a tree-walking evaluator's control-flow loop calls into —
//! the loop itself, and the source parser/AST it walks, are out of scope (§1) and are consumed
//! here only as the shape `dispatch(site_id, receiver, method_name, args)` expects.

mod dispatch;
mod inline_cache;
mod method_impl;
pub mod methods;
mod property_tests;
mod registry;
mod stack;

pub use dispatch::{DispatchEngine, ReadOnlyRegistry};
pub use inline_cache::{IcStateKind, IcStats, InlineCache, MAX_POLYMORPHIC_ENTRIES};
pub use method_impl::{BuiltinFn, MethodImpl};
pub use methods::{with_builtins, EVAL_BUILTIN_METHODS};
pub use registry::MethodRegistry;
pub use stack::ensure_sufficient_stack;

/// Build a dispatch engine with every built-in method pack registered — the state a host
/// embeds before running any user code (§3's Method Registry lifecycle).
pub fn new_engine() -> DispatchEngine {
    DispatchEngine::new(with_builtins())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ruby_values::{ScalarInt, Value};

    use super::*;

    /// §8 invariant 1: dispatch equals a direct registry lookup-and-call when one exists.
    #[test]
    fn dispatch_matches_direct_registry_call() {
        let engine = new_engine();
        let receiver = Value::Integer(ScalarInt::new(10));
        let args = [Value::Integer(ScalarInt::new(3))];

        let via_dispatch = engine.dispatch(0, &receiver, "+", &args).unwrap();
        let direct = engine.registry().read().call(&receiver, "+", &args).unwrap();

        assert!(via_dispatch.ruby_eq(&direct));
    }

    /// §8 S5: a method on both `Object` and `Integer` resolves to the `Integer` override.
    #[test]
    fn s5_mro_prefers_the_most_specific_class() {
        let engine = new_engine();
        engine
            .registry()
            .write()
            .register("Object", "kind", MethodImpl::builtin(|_, _| Ok(Value::from_string("object".to_owned()))));
        engine
            .registry()
            .write()
            .register("Integer", "kind", MethodImpl::builtin(|_, _| Ok(Value::from_string("integer".to_owned()))));

        let result = engine
            .dispatch(1, &Value::Integer(ScalarInt::ZERO), "kind", &[])
            .unwrap();
        assert_eq!(result.as_str().unwrap(), "integer");
    }

    /// §8 S6: `nil.frobnicate` raises `NoMethodError` carrying `class=NilClass`,
    /// `method=frobnicate`.
    #[test]
    fn s6_no_method_error_carries_class_and_method() {
        let engine = new_engine();
        let err = engine.dispatch(2, &Value::Nil, "frobnicate", &[]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("NilClass"));
        assert!(message.contains("frobnicate"));
    }
}
