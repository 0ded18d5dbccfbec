//! Object/Kernel protocols (§4.1): every value answers these, registered once on `Object` so the
//! MRO walk picks them up for any receiver that doesn't override them.

use ruby_values::{ScalarInt, Value};

use super::{reg, require_args, require_one_arg};
use crate::registry::MethodRegistry;

fn class_name(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::from_string(receiver.class_name().to_owned()))
}

fn is_nil(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::Bool(receiver.is_nil()))
}

fn eq(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let other = require_one_arg(args)?;
    Ok(Value::Bool(receiver.ruby_eq(other)))
}

fn equal(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let other = require_one_arg(args)?;
    Ok(Value::Bool(receiver.is_identical(other)))
}

fn object_id(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    #[expect(
        clippy::cast_possible_wrap,
        reason = "object_id is a distinguishing integer, not a faithful pointer value"
    )]
    let id = receiver.object_id() as i64;
    Ok(Value::Integer(ScalarInt::new(id)))
}

fn kind_of(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let other = require_one_arg(args)?;
    let class = other.as_str().unwrap_or_else(|_| other.to_s());
    Ok(Value::Bool(
        receiver.default_ancestors().iter().any(|a| *a == class),
    ))
}

fn instance_of(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let other = require_one_arg(args)?;
    let class = other.as_str().unwrap_or_else(|_| other.to_s());
    Ok(Value::Bool(receiver.class_name() == class))
}

fn respond_to(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let name = require_one_arg(args)?.as_str()?;
    Ok(Value::Bool(
        super::EVAL_BUILTIN_METHODS
            .iter()
            .any(|(class, method)| *method == name && receiver.default_ancestors().contains(class)),
    ))
}

fn to_s(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::from_string(receiver.to_s()))
}

fn inspect(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    require_args(args, 0)?;
    Ok(Value::from_string(receiver.inspect()))
}

fn compare(receiver: &Value, args: &[Value]) -> ruby_values::RubyResult<Value> {
    let other = require_one_arg(args)?;
    Ok(match receiver.compare(other) {
        Some(ordering) => Value::Integer(ScalarInt::new(ordering as i64)),
        None => Value::Nil,
    })
}

pub(super) fn register(registry: &mut MethodRegistry) {
    reg(registry, "Object", "class", class_name);
    reg(registry, "Object", "nil?", is_nil);
    reg(registry, "Object", "==", eq);
    reg(registry, "Object", "equal?", equal);
    reg(registry, "Object", "object_id", object_id);
    reg(registry, "Object", "kind_of?", kind_of);
    reg(registry, "Object", "is_a?", kind_of);
    reg(registry, "Object", "instance_of?", instance_of);
    reg(registry, "Object", "respond_to?", respond_to);
    reg(registry, "Object", "to_s", to_s);
    reg(registry, "Object", "inspect", inspect);
    reg(registry, "Object", "<=>", compare);
}
