//! `Rational` built-ins (§4.2): cross-multiplication arithmetic, always re-simplified.

use ruby_values::{type_error, RationalValue, Value};

use super::{reg, require_args, require_one_arg};
use crate::registry::MethodRegistry;

fn as_rational(receiver: &Value) -> ruby_values::RubyResult<RationalValue> {
    match receiver {
        Value::Rational(r) => Ok(*r.read()),
        other => Err(other.type_error_for("Rational")),
    }
}

fn coerce(value: &Value) -> ruby_values::RubyResult<RationalValue> {
    match value {
        Value::Rational(r) => Ok(*r.read()),
        Value::Integer(i) => RationalValue::new(i.get(), 1),
        other => Err(type_error("Rational or Integer", other.class_name())),
    }
}

fn add(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let lhs = as_rational(receiver)?;
    let rhs = coerce(require_one_arg(args)?)?;
    Ok(Value::from_rational(lhs.add(rhs)?))
}

fn sub(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let lhs = as_rational(receiver)?;
    let rhs = coerce(require_one_arg(args)?)?;
    Ok(Value::from_rational(lhs.sub(rhs)?))
}

fn mul(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let lhs = as_rational(receiver)?;
    let rhs = coerce(require_one_arg(args)?)?;
    Ok(Value::from_rational(lhs.mul(rhs)?))
}

fn div(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let lhs = as_rational(receiver)?;
    let rhs = coerce(require_one_arg(args)?)?;
    Ok(Value::from_rational(lhs.div(rhs)?))
}

/// `Rational#to_r`: identity, per §9's Open Question resolution — return the receiver unchanged.
fn to_r(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(receiver.clone())
}

fn to_f(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::Float(as_rational(receiver)?.as_f64()))
}

pub(super) fn register(registry: &mut MethodRegistry) {
    reg(registry, "Rational", "+", add);
    reg(registry, "Rational", "-", sub);
    reg(registry, "Rational", "*", mul);
    reg(registry, "Rational", "/", div);
    reg(registry, "Rational", "to_r", to_r);
    reg(registry, "Rational", "to_f", to_f);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn s3_one_half_plus_one_third_is_five_sixths() {
        let lhs = Value::from_rational(RationalValue::new(1, 2).unwrap());
        let rhs = Value::from_rational(RationalValue::new(1, 3).unwrap());
        let result = add(&lhs, &[rhs]).unwrap();
        match result {
            Value::Rational(r) => {
                let r = r.read();
                assert_eq!((r.numerator(), r.denominator()), (5, 6));
            }
            _ => panic!("expected Rational"),
        }
    }

    #[test]
    fn to_r_returns_the_receiver_identity() {
        let receiver = Value::from_rational(RationalValue::new(3, 4).unwrap());
        let result = to_r(&receiver, &[]).unwrap();
        assert!(receiver.is_identical(&result));
    }
}
