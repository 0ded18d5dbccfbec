//! The polymorphic Ruby value model: the tagged [`Value`] union, its built-in protocols, numeric
//! types, container semantics, and the error taxonomy the dispatch core raises.

mod errors;
mod heap;
mod method_key;
mod range_value;
mod rational_value;
mod scalar_int;
mod shared;
mod value;

pub use errors::{
    argument_error, argument_error_detail, assertion_failure, no_method_error, range_error,
    type_error, zero_division_error, RubyError, RubyResult,
};
pub use heap::Heap;
pub use method_key::MethodKey;
pub use range_value::RangeValue;
pub use rational_value::RationalValue;
pub use scalar_int::{gcd, ScalarInt};
pub use shared::{SharedMutableRegistry, SharedRegistry};
pub use value::{HashValue, ObjectValue, Value};
