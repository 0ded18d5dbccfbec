//! `Hash` built-ins (§4.2): insertion-ordered mapping, keys compared by Ruby equality.

use ruby_values::{ScalarInt, Value};

use super::{reg, require_args, require_one_arg};
use crate::registry::MethodRegistry;

fn as_hash(receiver: &Value) -> ruby_values::RubyResult<ruby_values::Heap<ruby_values::HashValue>> {
    match receiver {
        Value::Hash(h) => Ok(h.clone()),
        other => Err(other.type_error_for("Hash")),
    }
}

fn length(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    let h = as_hash(receiver)?;
    let len = h.read().len();
    Ok(Value::Integer(ScalarInt::new(len as i64)))
}

fn index(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let h = as_hash(receiver)?;
    let key = require_one_arg(args)?;
    let value = h.read().get(key).cloned().unwrap_or(Value::Nil);
    Ok(value)
}

fn index_set(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 2)?;
    let h = as_hash(receiver)?;
    h.write().insert(args[0].clone(), args[1].clone());
    Ok(args[1].clone())
}

fn keys(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    let h = as_hash(receiver)?;
    let result = Value::from_array(h.read().keys());
    Ok(result)
}

fn values(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    let h = as_hash(receiver)?;
    let result = Value::from_array(h.read().values());
    Ok(result)
}

pub(super) fn register(registry: &mut MethodRegistry) {
    reg(registry, "Hash", "length", length);
    reg(registry, "Hash", "[]", index);
    reg(registry, "Hash", "[]=", index_set);
    reg(registry, "Hash", "keys", keys);
    reg(registry, "Hash", "values", values);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruby_values::HashValue;

    #[test]
    fn set_then_get_round_trips() {
        let receiver = Value::from_hash(HashValue::new());
        index_set(
            &receiver,
            &[Value::from_string("k".to_owned()), Value::Integer(ScalarInt::new(42))],
        )
        .unwrap();
        let result = index(&receiver, &[Value::from_string("k".to_owned())]).unwrap();
        assert!(matches!(result, Value::Integer(i) if i.get() == 42));
    }

    #[test]
    fn missing_key_returns_nil() {
        let receiver = Value::from_hash(HashValue::new());
        let result = index(&receiver, &[Value::from_string("missing".to_owned())]).unwrap();
        assert!(result.is_nil());
    }
}
