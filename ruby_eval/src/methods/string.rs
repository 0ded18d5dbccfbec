//! `String` built-ins (§4.2): code-point addressed, supports negative indexing.

use ruby_values::{ScalarInt, Value};

use super::{reg, require_args, require_one_arg};
use crate::registry::MethodRegistry;

fn length(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    let s = receiver.as_str()?;
    Ok(Value::Integer(ScalarInt::new(s.chars().count() as i64)))
}

fn concat(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let lhs = receiver.as_str()?;
    let rhs = require_one_arg(args)?.as_str()?;
    Ok(Value::from_string(lhs + &rhs))
}

/// `[]`: negative indices count from the end, `-1` is the last code point (§4.2).
fn index(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let s = receiver.as_str()?;
    let idx = require_one_arg(args)?.as_integer()?.get();
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as i64;
    let resolved = if idx < 0 { idx + len } else { idx };
    if resolved < 0 || resolved >= len {
        return Ok(Value::Nil);
    }
    Ok(Value::from_string(chars[resolved as usize].to_string()))
}

fn upcase(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::from_string(receiver.as_str()?.to_uppercase()))
}

fn downcase(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::from_string(receiver.as_str()?.to_lowercase()))
}

fn reverse(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::from_string(receiver.as_str()?.chars().rev().collect()))
}

pub(super) fn register(registry: &mut MethodRegistry) {
    reg(registry, "String", "length", length);
    reg(registry, "String", "+", concat);
    reg(registry, "String", "[]", index);
    reg(registry, "String", "upcase", upcase);
    reg(registry, "String", "downcase", downcase);
    reg(registry, "String", "reverse", reverse);
}
