//! `Range` built-ins (§4.2): delegate straight to `RangeValue`, which already implements the
//! numeric/char-endpoint semantics and `TypeError` rules.

use ruby_values::{ScalarInt, Value};

use super::{reg, require_args, require_one_arg};
use crate::registry::MethodRegistry;

fn as_range(receiver: &Value) -> ruby_values::RubyResult<ruby_values::Heap<ruby_values::RangeValue>> {
    match receiver {
        Value::Range(r) => Ok(r.clone()),
        other => Err(other.type_error_for("Range")),
    }
}

fn size(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    let r = as_range(receiver)?;
    let size = r.read().size()?;
    Ok(Value::Integer(ScalarInt::new(size)))
}

fn to_a(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    let r = as_range(receiver)?;
    let items = r.read().to_a()?;
    Ok(Value::from_array(items))
}

fn includes(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let r = as_range(receiver)?;
    let needle = require_one_arg(args)?;
    let included = r.read().includes(needle)?;
    Ok(Value::Bool(included))
}

fn first(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(as_range(receiver)?.read().first())
}

fn last(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    as_range(receiver)?.read().last()
}

fn min(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(as_range(receiver)?.read().min())
}

fn max(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    as_range(receiver)?.read().max()
}

pub(super) fn register(registry: &mut MethodRegistry) {
    reg(registry, "Range", "size", size);
    reg(registry, "Range", "to_a", to_a);
    reg(registry, "Range", "include?", includes);
    reg(registry, "Range", "first", first);
    reg(registry, "Range", "last", last);
    reg(registry, "Range", "min", min);
    reg(registry, "Range", "max", max);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ruby_values::RangeValue;

    use super::*;

    fn int_range(start: i64, end: i64, inclusive: bool) -> Value {
        Value::from_range(RangeValue::new(
            Value::Integer(ScalarInt::new(start)),
            Value::Integer(ScalarInt::new(end)),
            inclusive,
        ))
    }

    #[test]
    fn s4_inclusive_and_exclusive_include_differ_at_the_boundary() {
        let inclusive = int_range(1, 5, true);
        let exclusive = int_range(1, 5, false);
        let five = Value::Integer(ScalarInt::new(5));
        assert!(matches!(
            includes(&inclusive, &[five.clone()]).unwrap(),
            Value::Bool(true)
        ));
        assert!(matches!(includes(&exclusive, &[five]).unwrap(), Value::Bool(false)));
    }

    #[test]
    fn s4_char_range_to_a_yields_expected_letters() {
        let range = Value::from_range(RangeValue::new(
            Value::from_string("a".to_owned()),
            Value::from_string("e".to_owned()),
            true,
        ));
        let result = to_a(&range, &[]).unwrap();
        let array = result.as_array().unwrap();
        let letters: Vec<String> = array.read().iter().map(Value::to_s).collect();
        assert_eq!(letters, vec!["a", "b", "c", "d", "e"]);
    }
}
