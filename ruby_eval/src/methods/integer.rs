//! `Integer` built-ins (§4.2): arbitrary-precision arithmetic (overflow promotes to a `Big`
//! `ScalarInt`, never raises — see `ruby_values::ScalarInt`), floor division, numeric coercion.

use ruby_values::{type_error, zero_division_error, RubyResult, Value};

use super::{reg, require_args, require_one_arg};
use crate::registry::MethodRegistry;

/// Integer+Float promotes to Float; Integer+Integer stays Integer, widening to a `Big` rather
/// than raising if the sum overflows `i64` (§4.2's arbitrary-precision Integer).
fn add(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    let lhs = receiver.as_integer()?;
    match require_one_arg(args)? {
        Value::Integer(rhs) => Ok(Value::Integer(lhs.checked_add(rhs))),
        Value::Float(rhs) => Ok(Value::Float(lhs.as_f64() + rhs)),
        other => Err(type_error("Integer or Float", other.class_name())),
    }
}

fn sub(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    let lhs = receiver.as_integer()?;
    match require_one_arg(args)? {
        Value::Integer(rhs) => Ok(Value::Integer(lhs.checked_sub(rhs))),
        Value::Float(rhs) => Ok(Value::Float(lhs.as_f64() - rhs)),
        other => Err(type_error("Integer or Float", other.class_name())),
    }
}

fn mul(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    let lhs = receiver.as_integer()?;
    match require_one_arg(args)? {
        Value::Integer(rhs) => Ok(Value::Integer(lhs.checked_mul(rhs))),
        Value::Float(rhs) => Ok(Value::Float(lhs.as_f64() * rhs)),
        other => Err(type_error("Integer or Float", other.class_name())),
    }
}

/// `/` on two Integers is floor division, not implicit Rational construction (§4.2).
fn div(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    let lhs = receiver.as_integer()?;
    match require_one_arg(args)? {
        Value::Integer(rhs) => {
            let result = lhs
                .checked_floor_div(rhs)
                .ok_or_else(|| zero_division_error("Integer"))?;
            Ok(Value::Integer(result))
        }
        Value::Float(rhs) => {
            if *rhs == 0.0 {
                return Err(zero_division_error("Integer/Float"));
            }
            Ok(Value::Float(lhs.as_f64() / rhs))
        }
        other => Err(type_error("Integer or Float", other.class_name())),
    }
}

fn modulo(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    let lhs = receiver.as_integer()?;
    let rhs = require_one_arg(args)?.as_integer()?;
    let result = lhs
        .checked_floor_rem(&rhs)
        .ok_or_else(|| zero_division_error("Integer"))?;
    Ok(Value::Integer(result))
}

fn neg(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    require_args(args, 0)?;
    let i = receiver.as_integer()?;
    Ok(Value::Integer(i.checked_neg()))
}

fn pos(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    require_args(args, 0)?;
    Ok(receiver.clone())
}

fn to_f(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::Float(receiver.as_integer()?.as_f64()))
}

/// `Integer#to_r`: an exact rational with denominator 1.
fn to_r(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    require_args(args, 0)?;
    let i = receiver.as_integer()?;
    Ok(Value::from_rational(ruby_values::RationalValue::new(
        i.get(),
        1,
    )?))
}

pub(super) fn register(registry: &mut MethodRegistry) {
    reg(registry, "Integer", "+", add);
    reg(registry, "Integer", "-", sub);
    reg(registry, "Integer", "*", mul);
    reg(registry, "Integer", "/", div);
    reg(registry, "Integer", "%", modulo);
    reg(registry, "Integer", "-@", neg);
    reg(registry, "Integer", "+@", pos);
    reg(registry, "Integer", "to_f", to_f);
    reg(registry, "Integer", "to_r", to_r);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ruby_values::ScalarInt;

    use super::*;

    #[test]
    fn integer_plus_integer_stays_integer() {
        let result = add(&Value::Integer(ScalarInt::new(2)), &[Value::Integer(ScalarInt::new(3))]).unwrap();
        assert!(matches!(result, Value::Integer(i) if i.get() == 5));
    }

    #[test]
    fn integer_plus_float_promotes_to_float() {
        let result = add(&Value::Integer(ScalarInt::new(2)), &[Value::Float(0.5)]).unwrap();
        assert!(matches!(result, Value::Float(f) if f == 2.5));
    }

    #[test]
    fn division_is_floor_division() {
        let result = div(&Value::Integer(ScalarInt::new(-7)), &[Value::Integer(ScalarInt::new(2))]).unwrap();
        assert!(matches!(result, Value::Integer(i) if i.get() == -4));
    }

    #[test]
    fn division_by_zero_raises_zero_division_error() {
        assert!(div(&Value::Integer(ScalarInt::new(1)), &[Value::Integer(ScalarInt::ZERO)]).is_err());
    }

    /// Ruby never raises on Integer overflow — it silently widens to Bignum. `add` at the
    /// `i64::MAX` boundary must do the same rather than raising `ArgumentError`.
    #[test]
    fn addition_overflow_promotes_instead_of_raising() {
        let result = add(
            &Value::Integer(ScalarInt::new(i64::MAX)),
            &[Value::Integer(ScalarInt::ONE)],
        )
        .unwrap();
        let Value::Integer(sum) = result else {
            panic!("expected Integer");
        };
        assert_eq!(sum, ScalarInt::new(i64::MAX).checked_add(&ScalarInt::ONE));
        assert!(matches!(sum, ScalarInt::Big(_)));
    }

    #[test]
    fn negation_of_i64_min_promotes_instead_of_raising() {
        let result = neg(&Value::Integer(ScalarInt::new(i64::MIN)), &[]).unwrap();
        assert!(matches!(result, Value::Integer(ScalarInt::Big(_))));
    }
}
