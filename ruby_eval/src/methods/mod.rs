//! Built-in method packs: the registered implementations for Object/Kernel, Integer, Float,
//! String, Array, Hash, Range, and Rational (§2 component 3, §4.2).

mod array;
mod float;
mod hash;
mod integer;
mod object;
mod range;
mod rational;
mod string;

use ruby_values::argument_error;
use ruby_values::RubyResult;

use crate::method_impl::MethodImpl;
use crate::registry::MethodRegistry;

/// Fail unless exactly `expected` arguments were given.
pub(crate) fn require_args(args: &[ruby_values::Value], expected: usize) -> RubyResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(argument_error(args.len(), &expected.to_string()))
    }
}

/// Fail unless exactly one argument was given, returning a reference to it.
pub(crate) fn require_one_arg(args: &[ruby_values::Value]) -> RubyResult<&ruby_values::Value> {
    require_args(args, 1)?;
    Ok(&args[0])
}

/// Names of every method the built-in packs register, for cross-consistency tests (every name
/// here must resolve through `MethodRegistry::with_builtins()` for its declared receiver class).
pub const EVAL_BUILTIN_METHODS: &[(&str, &str)] = &[
    ("Object", "class"),
    ("Object", "nil?"),
    ("Object", "=="),
    ("Object", "equal?"),
    ("Object", "object_id"),
    ("Object", "kind_of?"),
    ("Object", "is_a?"),
    ("Object", "instance_of?"),
    ("Object", "respond_to?"),
    ("Object", "to_s"),
    ("Object", "inspect"),
    ("Object", "<=>"),
    ("Integer", "+"),
    ("Integer", "-"),
    ("Integer", "*"),
    ("Integer", "/"),
    ("Integer", "%"),
    ("Integer", "-@"),
    ("Integer", "+@"),
    ("Integer", "to_f"),
    ("Integer", "to_r"),
    ("Float", "+"),
    ("Float", "-"),
    ("Float", "*"),
    ("Float", "/"),
    ("Float", "-@"),
    ("Float", "to_i"),
    ("String", "length"),
    ("String", "+"),
    ("String", "[]"),
    ("String", "upcase"),
    ("String", "downcase"),
    ("String", "reverse"),
    ("Array", "length"),
    ("Array", "[]"),
    ("Array", "push"),
    ("Array", "first"),
    ("Array", "last"),
    ("Array", "include?"),
    ("Hash", "length"),
    ("Hash", "[]"),
    ("Hash", "[]="),
    ("Hash", "keys"),
    ("Hash", "values"),
    ("Range", "size"),
    ("Range", "to_a"),
    ("Range", "include?"),
    ("Range", "first"),
    ("Range", "last"),
    ("Range", "min"),
    ("Range", "max"),
    ("Rational", "+"),
    ("Rational", "-"),
    ("Rational", "*"),
    ("Rational", "/"),
    ("Rational", "to_r"),
    ("Rational", "to_f"),
];

/// Build a fresh registry with every built-in pack registered (§3's Method Registry: "the
/// registry is process-wide and initialized by built-in packs before any user code runs").
pub fn with_builtins() -> MethodRegistry {
    let mut registry = MethodRegistry::empty();
    object::register(&mut registry);
    integer::register(&mut registry);
    float::register(&mut registry);
    string::register(&mut registry);
    array::register(&mut registry);
    hash::register(&mut registry);
    range::register(&mut registry);
    rational::register(&mut registry);
    registry
}

pub(crate) fn reg(registry: &mut MethodRegistry, class: &'static str, method: &'static str, f: crate::method_impl::BuiltinFn) {
    registry.register(class, method, MethodImpl::builtin(f));
}
