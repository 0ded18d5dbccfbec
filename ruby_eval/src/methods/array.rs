//! `Array` built-ins (§4.2): ordered mutable sequence, negative indexing.

use ruby_values::{ScalarInt, Value};

use super::{reg, require_args, require_one_arg};
use crate::registry::MethodRegistry;

fn length(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    let a = receiver.as_array()?;
    let len = a.read().len();
    Ok(Value::Integer(ScalarInt::new(len as i64)))
}

/// `[]`: negative indices count from the end, `-1` is the last element (§4.2).
fn index(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let array = receiver.as_array()?;
    let idx = require_one_arg(args)?.as_integer()?.get();
    let array = array.read();
    let len = array.len() as i64;
    let resolved = if idx < 0 { idx + len } else { idx };
    if resolved < 0 || resolved >= len {
        return Ok(Value::Nil);
    }
    Ok(array[resolved as usize].clone())
}

fn push(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let array = receiver.as_array()?;
    let value = require_one_arg(args)?.clone();
    array.write().push(value);
    Ok(receiver.clone())
}

fn first(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    let array = receiver.as_array()?;
    let value = array.read().first().cloned().unwrap_or(Value::Nil);
    Ok(value)
}

fn last(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    let array = receiver.as_array()?;
    let value = array.read().last().cloned().unwrap_or(Value::Nil);
    Ok(value)
}

fn includes(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let array = receiver.as_array()?;
    let needle = require_one_arg(args)?;
    let found = array.read().iter().any(|v| v.ruby_eq(needle));
    Ok(Value::Bool(found))
}

pub(super) fn register(registry: &mut MethodRegistry) {
    reg(registry, "Array", "length", length);
    reg(registry, "Array", "[]", index);
    reg(registry, "Array", "push", push);
    reg(registry, "Array", "first", first);
    reg(registry, "Array", "last", last);
    reg(registry, "Array", "include?", includes);
}
