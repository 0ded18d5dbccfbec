//! The Ruby error taxonomy raised by the dispatch core (§7).
//!
//! Each variant carries the fields a host needs to report the failure; construction goes through
//! a `#[cold]` free function per kind so call sites read as `return Err(no_method_error(...))`
//! rather than a struct literal, matching the teacher's error-constructor idiom.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RubyError {
    #[error("undefined method `{method}' for {receiver_class} (arity {arity})")]
    NoMethodError {
        receiver_class: String,
        method: String,
        arity: usize,
    },

    #[error("no implicit conversion: expected {expected}, got {actual}")]
    TypeError { expected: String, actual: String },

    #[error("divided by 0 ({context})")]
    ZeroDivisionError { context: String },

    #[error("wrong number of arguments ({got} for {expected}){}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    ArgumentError {
        got: usize,
        expected: String,
        detail: Option<String>,
    },

    #[error("range endpoint comparison undefined: {reason}")]
    RangeError { reason: String },

    #[error("assertion failed: expected {expected}, got {actual}")]
    AssertionFailure { expected: String, actual: String },
}

#[cold]
pub fn no_method_error(receiver_class: &str, method: &str, arity: usize) -> RubyError {
    RubyError::NoMethodError {
        receiver_class: receiver_class.to_owned(),
        method: method.to_owned(),
        arity,
    }
}

#[cold]
pub fn type_error(expected: &str, actual: &str) -> RubyError {
    RubyError::TypeError {
        expected: expected.to_owned(),
        actual: actual.to_owned(),
    }
}

#[cold]
pub fn zero_division_error(context: &str) -> RubyError {
    RubyError::ZeroDivisionError {
        context: context.to_owned(),
    }
}

#[cold]
pub fn argument_error(got: usize, expected: &str) -> RubyError {
    RubyError::ArgumentError {
        got,
        expected: expected.to_owned(),
        detail: None,
    }
}

#[cold]
pub fn argument_error_detail(got: usize, expected: &str, detail: &str) -> RubyError {
    RubyError::ArgumentError {
        got,
        expected: expected.to_owned(),
        detail: Some(detail.to_owned()),
    }
}

#[cold]
pub fn range_error(reason: &str) -> RubyError {
    RubyError::RangeError {
        reason: reason.to_owned(),
    }
}

#[cold]
pub fn assertion_failure(expected: &str, actual: &str) -> RubyError {
    RubyError::AssertionFailure {
        expected: expected.to_owned(),
        actual: actual.to_owned(),
    }
}

pub type RubyResult<T> = Result<T, RubyError>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_method_error_carries_receiver_class_and_method() {
        let err = no_method_error("NilClass", "frobnicate", 0);
        match err {
            RubyError::NoMethodError {
                receiver_class,
                method,
                ..
            } => {
                assert_eq!(receiver_class, "NilClass");
                assert_eq!(method, "frobnicate");
            }
            _ => panic!("wrong variant"),
        }
    }
}
