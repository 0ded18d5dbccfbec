//! `MethodImpl`: the callable a registry lookup or IC hit ultimately invokes.

use std::sync::Arc;

use ruby_values::{RubyResult, Value};

pub type BuiltinFn = fn(&Value, &[Value]) -> RubyResult<Value>;

/// A callable accepting `(receiver, args…)` (§3's Method Registry definition).
///
/// Built-in methods are plain function pointers, comparable by address (needed so the inline
/// cache's invariant — "an IC entry's `impl` is the exact value returned by the registry lookup
/// at cache-fill time" — is checkable). User-defined methods (registered by `class … end`,
/// supplied by the out-of-scope evaluator as a closure over the method body) are reference-counted
/// trait objects compared by pointer identity.
#[derive(Clone)]
pub enum MethodImpl {
    Builtin(BuiltinFn),
    User(Arc<dyn Fn(&Value, &[Value]) -> RubyResult<Value> + Send + Sync>),
}

impl MethodImpl {
    pub fn builtin(f: BuiltinFn) -> Self {
        MethodImpl::Builtin(f)
    }

    pub fn user<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> RubyResult<Value> + Send + Sync + 'static,
    {
        MethodImpl::User(Arc::new(f))
    }

    pub fn call(&self, receiver: &Value, args: &[Value]) -> RubyResult<Value> {
        match self {
            MethodImpl::Builtin(f) => f(receiver, args),
            MethodImpl::User(f) => f(receiver, args),
        }
    }
}

impl PartialEq for MethodImpl {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MethodImpl::Builtin(a), MethodImpl::Builtin(b)) => (*a as usize) == (*b as usize),
            (MethodImpl::User(a), MethodImpl::User(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for MethodImpl {}

impl std::fmt::Debug for MethodImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MethodImpl::Builtin(_) => write!(f, "MethodImpl::Builtin"),
            MethodImpl::User(_) => write!(f, "MethodImpl::User"),
        }
    }
}
