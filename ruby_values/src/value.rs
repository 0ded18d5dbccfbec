//! The Ruby [`Value`] tagged union and its built-in Object protocols (§3, §4.1).

use std::fmt;

use ruby_ir::Name;
use rustc_hash::FxHashMap;

use crate::errors::{type_error, RubyError, RubyResult};
use crate::heap::Heap;
use crate::range_value::RangeValue;
use crate::rational_value::RationalValue;
use crate::scalar_int::ScalarInt;

/// A user-defined object: a named class plus an instance-variable mapping (§3's `Object`
/// variant).
#[derive(Debug, Clone)]
pub struct ObjectValue {
    pub class_name: &'static str,
    pub ivars: FxHashMap<Name, Value>,
}

impl ObjectValue {
    pub fn new(class_name: &'static str) -> Self {
        ObjectValue {
            class_name,
            ivars: FxHashMap::default(),
        }
    }
}

/// Ruby's ordered `Hash`: insertion-order pairs, keys compared by Ruby `==` rather than Rust
/// `Eq` (so e.g. `Integer(1)` and `Float(1.0)` collide as one key, matching Ruby).
#[derive(Debug, Clone, Default)]
pub struct HashValue {
    pairs: Vec<(Value, Value)>,
}

impl HashValue {
    pub fn new() -> Self {
        HashValue::default()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.pairs
            .iter()
            .find(|(k, _)| k.ruby_eq(key))
            .map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: Value, value: Value) {
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| k.ruby_eq(&key)) {
            slot.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(Value, Value)] {
        &self.pairs
    }

    pub fn keys(&self) -> Vec<Value> {
        self.pairs.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.pairs.iter().map(|(_, v)| v.clone()).collect()
    }
}

/// The polymorphic Ruby value (§3's Ruby Value table).
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(ScalarInt),
    Float(f64),
    String(Heap<String>),
    Symbol(Name),
    Array(Heap<Vec<Value>>),
    Hash(Heap<HashValue>),
    Range(Heap<RangeValue>),
    Rational(Heap<RationalValue>),
    Object(Heap<ObjectValue>),
}

impl Value {
    pub fn from_string(s: String) -> Self {
        Value::String(Heap::new(s))
    }

    pub fn from_array(values: Vec<Value>) -> Self {
        Value::Array(Heap::new(values))
    }

    pub fn from_hash(hash: HashValue) -> Self {
        Value::Hash(Heap::new(hash))
    }

    pub fn from_range(range: RangeValue) -> Self {
        Value::Range(Heap::new(range))
    }

    pub fn from_rational(rational: RationalValue) -> Self {
        Value::Rational(Heap::new(rational))
    }

    pub fn from_object(object: ObjectValue) -> Self {
        Value::Object(Heap::new(object))
    }

    /// `class()`: the built-in class name. User objects report their own class name.
    pub fn class_name(&self) -> &'static str {
        match self {
            Value::Nil => "NilClass",
            Value::Bool(true) => "TrueClass",
            Value::Bool(false) => "FalseClass",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Array(_) => "Array",
            Value::Hash(_) => "Hash",
            Value::Range(_) => "Range",
            Value::Rational(_) => "Rational",
            Value::Object(heap) => heap.read().class_name,
        }
    }

    /// Ruby truthiness: only `nil` and `false` are falsy (§4.1).
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// A stable identity integer for `object_id`. Immutable scalars (nil/bool/integer) use a
    /// small tagged encoding since Ruby gives them stable small ids; heap-backed values use their
    /// allocation address.
    pub fn object_id(&self) -> usize {
        match self {
            Value::Nil => 0,
            Value::Bool(false) => 1,
            Value::Bool(true) => 2,
            #[expect(
                clippy::cast_sign_loss,
                reason = "object_id only needs a stable distinguishing integer, not a faithful numeric value"
            )]
            Value::Integer(i) => (i.get() as usize).wrapping_mul(2).wrapping_add(3),
            Value::Float(f) => f.to_bits() as usize,
            Value::Symbol(n) => n.raw() as usize,
            Value::String(h) => h.object_id(),
            Value::Array(h) => h.object_id(),
            Value::Hash(h) => h.object_id(),
            Value::Range(h) => h.object_id(),
            Value::Rational(h) => h.object_id(),
            Value::Object(h) => h.object_id(),
        }
    }

    /// `equal?`: identity comparison.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Hash(a), Value::Hash(b)) => a.ptr_eq(b),
            (Value::Range(a), Value::Range(b)) => a.ptr_eq(b),
            (Value::Rational(a), Value::Rational(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => self.object_id() == other.object_id() && self.class_name() == other.class_name(),
        }
    }

    /// `ancestors()`: the built-in chain for values whose class isn't registered in the method
    /// registry's ancestor table (used as a fallback; the registry is the source of truth once a
    /// class has been registered, including open-class extension).
    pub fn default_ancestors(&self) -> Vec<&'static str> {
        match self {
            Value::Nil => vec!["NilClass", "Object", "Kernel", "BasicObject"],
            Value::Bool(true) => vec!["TrueClass", "Object", "Kernel", "BasicObject"],
            Value::Bool(false) => vec!["FalseClass", "Object", "Kernel", "BasicObject"],
            Value::Integer(_) => vec![
                "Integer",
                "Numeric",
                "Comparable",
                "Object",
                "Kernel",
                "BasicObject",
            ],
            Value::Float(_) => vec![
                "Float",
                "Numeric",
                "Comparable",
                "Object",
                "Kernel",
                "BasicObject",
            ],
            Value::Rational(_) => vec![
                "Rational",
                "Numeric",
                "Comparable",
                "Object",
                "Kernel",
                "BasicObject",
            ],
            Value::String(_) => vec!["String", "Comparable", "Object", "Kernel", "BasicObject"],
            Value::Symbol(_) => vec!["Symbol", "Object", "Kernel", "BasicObject"],
            Value::Array(_) => vec!["Array", "Object", "Kernel", "BasicObject"],
            Value::Hash(_) => vec!["Hash", "Object", "Kernel", "BasicObject"],
            Value::Range(_) => vec!["Range", "Object", "Kernel", "BasicObject"],
            Value::Object(_) => vec!["Object", "Kernel", "BasicObject"],
        }
    }

    /// `==`: Ruby value equality, including the numeric cross-type cases (`1 == 1.0`,
    /// `Rational(1,1) == 1`).
    pub fn ruby_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                a.as_f64() == *b
            }
            (Value::Rational(a), Value::Rational(b)) => *a.read() == *b.read(),
            (Value::Rational(a), Value::Integer(b)) | (Value::Integer(b), Value::Rational(a)) => {
                a.read().equals_integer(b.get())
            }
            (Value::String(a), Value::String(b)) => *a.read() == *b.read(),
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                let (a, b) = (a.read(), b.read());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.ruby_eq(y))
            }
            (Value::Hash(a), Value::Hash(b)) => {
                let (a, b) = (a.read(), b.read());
                a.len() == b.len()
                    && a.pairs()
                        .iter()
                        .all(|(k, v)| b.get(k).is_some_and(|bv| bv.ruby_eq(v)))
            }
            (Value::Range(a), Value::Range(b)) => {
                let (a, b) = (a.read(), b.read());
                a.inclusive == b.inclusive && a.start.ruby_eq(&b.start) && a.end.ruby_eq(&b.end)
            }
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// `<=>`: `Some(Ordering)` when comparable, `None` when incomparable (Ruby's `nil`).
    pub fn compare(&self, other: &Value) -> Option<std::cmp::Ordering> {
        use std::cmp::Ordering;
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Integer(a), Value::Float(b)) => a.as_f64().partial_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&b.as_f64()),
            (Value::Rational(a), Value::Rational(b)) => {
                let (a, b) = (*a.read(), *b.read());
                (a.numerator() * b.denominator()).partial_cmp(&(b.numerator() * a.denominator()))
            }
            // Treat the Integer side as a Rational with denominator 1, same as `ruby_eq`'s
            // `equals_integer` pairing — cross-multiply rather than round-trip through `Float`,
            // since the denominator is always positive and this stays exact.
            (Value::Rational(a), Value::Integer(b)) => {
                let r = *a.read();
                i128::from(r.numerator()).partial_cmp(&(i128::from(b.get()) * i128::from(r.denominator())))
            }
            (Value::Integer(a), Value::Rational(b)) => {
                let r = *b.read();
                (i128::from(a.get()) * i128::from(r.denominator())).partial_cmp(&i128::from(r.numerator()))
            }
            (Value::String(a), Value::String(b)) => a.read().partial_cmp(&*b.read()),
            (Value::Array(a), Value::Array(b)) => {
                let (a, b) = (a.read(), b.read());
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.compare(y) {
                        Some(Ordering::Equal) => continue,
                        other => return other,
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            _ => None,
        }
    }

    pub fn to_s(&self) -> String {
        match self {
            Value::Nil => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_ruby_float(*f),
            Value::String(s) => s.read().clone(),
            Value::Symbol(n) => ruby_ir::resolve(*n).to_owned(),
            Value::Rational(r) => r.read().to_string(),
            _ => self.inspect(),
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Value::Nil => "nil".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_ruby_float(*f),
            Value::String(s) => format!("{:?}", s.read()),
            Value::Symbol(n) => format!(":{}", ruby_ir::resolve(*n)),
            Value::Array(a) => {
                let items: Vec<String> = a.read().iter().map(Value::inspect).collect();
                format!("[{}]", items.join(", "))
            }
            Value::Hash(h) => {
                let items: Vec<String> = h
                    .read()
                    .pairs()
                    .iter()
                    .map(|(k, v)| format!("{} => {}", k.inspect(), v.inspect()))
                    .collect();
                format!("{{{}}}", items.join(", "))
            }
            Value::Range(r) => {
                let r = r.read();
                format!(
                    "{}{}{}",
                    r.start.inspect(),
                    if r.inclusive { ".." } else { "..." },
                    r.end.inspect()
                )
            }
            Value::Rational(r) => format!("({})", r.read()),
            Value::Object(o) => format!("#<{}>", o.read().class_name),
        }
    }

    pub fn as_integer(&self) -> RubyResult<ScalarInt> {
        match self {
            Value::Integer(i) => Ok(i.clone()),
            other => Err(type_error("Integer", other.class_name())),
        }
    }

    pub fn as_str(&self) -> RubyResult<String> {
        match self {
            Value::String(s) => Ok(s.read().clone()),
            other => Err(type_error("String", other.class_name())),
        }
    }

    pub fn as_array(&self) -> RubyResult<Heap<Vec<Value>>> {
        match self {
            Value::Array(a) => Ok(a.clone()),
            other => Err(type_error("Array", other.class_name())),
        }
    }

    pub fn as_f64(&self) -> RubyResult<f64> {
        match self {
            Value::Integer(i) => Ok(i.as_f64()),
            Value::Float(f) => Ok(*f),
            Value::Rational(r) => Ok(r.read().as_f64()),
            other => Err(type_error("Numeric", other.class_name())),
        }
    }

    pub fn bool_value(&self) -> bool {
        self.is_truthy()
    }

    pub fn type_error_for(&self, expected: &str) -> RubyError {
        type_error(expected, self.class_name())
    }
}

fn format_ruby_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn only_nil_and_false_are_falsy() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Integer(ScalarInt::ZERO).is_truthy());
        assert!(Value::from_string(String::new()).is_truthy());
        assert!(Value::from_array(Vec::new()).is_truthy());
    }

    #[test]
    fn nil_is_only_nil_for_nil_check() {
        assert!(Value::Nil.is_nil());
        assert!(!Value::Bool(false).is_nil());
    }

    #[test]
    fn integer_and_float_compare_equal_across_types() {
        assert!(Value::Integer(ScalarInt::new(1)).ruby_eq(&Value::Float(1.0)));
    }

    #[test]
    fn rational_equals_integer_iff_denominator_one() {
        let r = Value::from_rational(RationalValue::new(4, 2).unwrap());
        assert!(r.ruby_eq(&Value::Integer(ScalarInt::new(2))));
    }

    #[test]
    fn rational_equal_to_an_integer_also_compares_equal() {
        use std::cmp::Ordering;
        let r = Value::from_rational(RationalValue::new(4, 2).unwrap());
        let i = Value::Integer(ScalarInt::new(2));
        assert!(r.ruby_eq(&i));
        assert_eq!(r.compare(&i), Some(Ordering::Equal));
        assert_eq!(i.compare(&r), Some(Ordering::Equal));
    }

    #[test]
    fn rational_less_than_integer_compares_consistently_with_equality() {
        use std::cmp::Ordering;
        let half = Value::from_rational(RationalValue::new(1, 2).unwrap());
        let one = Value::Integer(ScalarInt::ONE);
        assert_eq!(half.compare(&one), Some(Ordering::Less));
        assert_eq!(one.compare(&half), Some(Ordering::Greater));
    }

    #[test]
    fn array_equality_is_elementwise() {
        let a = Value::from_array(vec![Value::Integer(ScalarInt::new(1)), Value::Nil]);
        let b = Value::from_array(vec![Value::Integer(ScalarInt::new(1)), Value::Nil]);
        assert!(a.ruby_eq(&b));
    }

    #[test]
    fn identity_distinguishes_equal_but_distinct_arrays() {
        let a = Value::from_array(vec![Value::Integer(ScalarInt::new(1))]);
        let b = Value::from_array(vec![Value::Integer(ScalarInt::new(1))]);
        assert!(a.ruby_eq(&b));
        assert!(!a.is_identical(&b));
        assert!(a.is_identical(&a.clone()));
    }

    #[test]
    fn class_name_reflects_variant() {
        assert_eq!(Value::Nil.class_name(), "NilClass");
        assert_eq!(Value::Bool(true).class_name(), "TrueClass");
        assert_eq!(Value::Integer(ScalarInt::ZERO).class_name(), "Integer");
    }

    #[test]
    fn hash_lookup_uses_ruby_equality_across_numeric_types() {
        let mut h = HashValue::new();
        h.insert(Value::Integer(ScalarInt::new(1)), Value::from_string("one".to_owned()));
        let hit = h.get(&Value::Float(1.0));
        assert_eq!(hit.unwrap().as_str().unwrap(), "one");
    }
}
