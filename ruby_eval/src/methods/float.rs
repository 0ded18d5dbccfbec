//! `Float` built-ins (§4.2): IEEE-754 arithmetic, Integer promotion.

use ruby_values::{type_error, RubyResult, ScalarInt, Value};

use super::{reg, require_args, require_one_arg};
use crate::registry::MethodRegistry;

fn as_f64_operand(value: &Value) -> RubyResult<f64> {
    match value {
        Value::Integer(i) => Ok(i.as_f64()),
        Value::Float(f) => Ok(*f),
        other => Err(type_error("Integer or Float", other.class_name())),
    }
}

fn add(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    let lhs = receiver.as_f64()?;
    Ok(Value::Float(lhs + as_f64_operand(require_one_arg(args)?)?))
}

fn sub(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    let lhs = receiver.as_f64()?;
    Ok(Value::Float(lhs - as_f64_operand(require_one_arg(args)?)?))
}

fn mul(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    let lhs = receiver.as_f64()?;
    Ok(Value::Float(lhs * as_f64_operand(require_one_arg(args)?)?))
}

fn div(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    let lhs = receiver.as_f64()?;
    // Float division by zero yields Infinity/NaN in Ruby, not ZeroDivisionError.
    Ok(Value::Float(lhs / as_f64_operand(require_one_arg(args)?)?))
}

fn neg(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::Float(-receiver.as_f64()?))
}

fn to_i(receiver: &Value, args: &[Value]) -> RubyResult<Value> {
    require_args(args, 0)?;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Float#to_i truncates toward zero, matching Ruby, within i64 range"
    )]
    let truncated = receiver.as_f64()?.trunc() as i64;
    Ok(Value::Integer(ScalarInt::new(truncated)))
}

pub(super) fn register(registry: &mut MethodRegistry) {
    reg(registry, "Float", "+", add);
    reg(registry, "Float", "-", sub);
    reg(registry, "Float", "*", mul);
    reg(registry, "Float", "/", div);
    reg(registry, "Float", "-@", neg);
    reg(registry, "Float", "to_i", to_i);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_division_by_zero_is_infinity_not_an_error() {
        let result = div(&Value::Float(1.0), &[Value::Integer(ScalarInt::ZERO)]).unwrap();
        assert!(matches!(result, Value::Float(f) if f.is_infinite()));
    }

    #[test]
    fn to_i_truncates_toward_zero() {
        let result = to_i(&Value::Float(-2.9), &[]).unwrap();
        assert!(matches!(result, Value::Integer(i) if i.get() == -2));
    }
}
