//! Ruby `Range`: `{start, end, inclusive?}` over comparable, homogeneous endpoints.

use crate::errors::{type_error, RubyError};
use crate::scalar_int::ScalarInt;
use crate::Value;

/// The two endpoint shapes a `Range` supports for size/count/to_a/include? per §4.2: integer
/// endpoints, and single-character string endpoints (compared by code point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Integer(i64),
    Char(char),
}

impl Endpoint {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(Endpoint::Integer(i.get())),
            Value::String(s) => {
                let snapshot = s.read();
                let mut chars = snapshot.chars();
                let first = chars.next()?;
                if chars.next().is_some() {
                    None
                } else {
                    Some(Endpoint::Char(first))
                }
            }
            _ => None,
        }
    }

    fn code_point(self) -> i64 {
        match self {
            Endpoint::Integer(i) => i,
            Endpoint::Char(c) => i64::from(u32::from(c)),
        }
    }

    fn to_value(self) -> Value {
        match self {
            Endpoint::Integer(i) => Value::Integer(ScalarInt::new(i)),
            Endpoint::Char(c) => Value::from_string(c.to_string()),
        }
    }
}

/// `{start, end, inclusive?}`. Endpoints are stored as plain `Value`s (so a `Range` can hold any
/// two values for `===`/pattern-matching purposes) but the size/iteration operations below only
/// accept the two homogeneous comparable shapes the spec names, raising `TypeError` otherwise.
#[derive(Debug, Clone)]
pub struct RangeValue {
    pub start: Value,
    pub end: Value,
    pub inclusive: bool,
}

impl RangeValue {
    pub fn new(start: Value, end: Value, inclusive: bool) -> Self {
        RangeValue {
            start,
            end,
            inclusive,
        }
    }

    fn endpoints(&self) -> Result<(Endpoint, Endpoint), RubyError> {
        let start = Endpoint::from_value(&self.start)
            .ok_or_else(|| type_error("Range endpoint", self.start.class_name()))?;
        let end = Endpoint::from_value(&self.end)
            .ok_or_else(|| type_error("Range endpoint", self.end.class_name()))?;
        match (start, end) {
            (Endpoint::Integer(_), Endpoint::Integer(_)) | (Endpoint::Char(_), Endpoint::Char(_)) => {
                Ok((start, end))
            }
            _ => Err(type_error("homogeneous Range endpoints", "mixed types")),
        }
    }

    /// `size`/`count`: `max(0, end - start + (inclusive? ? 1 : 0))`.
    pub fn size(&self) -> Result<i64, RubyError> {
        let (start, end) = self.endpoints()?;
        let (s, e) = (start.code_point(), end.code_point());
        let raw = e - s + i64::from(self.inclusive);
        Ok(raw.max(0))
    }

    /// `to_a`: materialize every element from `start` to `end`, respecting inclusivity.
    pub fn to_a(&self) -> Result<Vec<Value>, RubyError> {
        let (start, end) = self.endpoints()?;
        let (s, e) = (start.code_point(), end.code_point());
        let last = if self.inclusive { e } else { e - 1 };
        if last < s {
            return Ok(Vec::new());
        }
        let is_char = matches!(start, Endpoint::Char(_));
        let mut out = Vec::with_capacity((last - s + 1) as usize);
        let mut cur = s;
        while cur <= last {
            let endpoint = if is_char {
                #[expect(
                    clippy::cast_sign_loss,
                    reason = "char ranges only ever hold valid non-negative code points"
                )]
                let code_point = cur as u32;
                Endpoint::Char(char::from_u32(code_point).ok_or_else(|| {
                    type_error("valid Unicode code point", "out-of-range value")
                })?)
            } else {
                Endpoint::Integer(cur)
            };
            out.push(endpoint.to_value());
            cur += 1;
        }
        Ok(out)
    }

    /// `include?`: ordered comparison; exclusive upper bound uses `<` rather than `<=`.
    pub fn includes(&self, value: &Value) -> Result<bool, RubyError> {
        let (start, end) = self.endpoints()?;
        let candidate = Endpoint::from_value(value)
            .ok_or_else(|| type_error("Range endpoint", value.class_name()))?;
        let (s, e, v) = (start.code_point(), end.code_point(), candidate.code_point());
        if v < s {
            return Ok(false);
        }
        Ok(if self.inclusive { v <= e } else { v < e })
    }

    pub fn first(&self) -> Value {
        self.start.clone()
    }

    /// `last`: with no args, the predecessor of `end` on an exclusive range, `end` itself on an
    /// inclusive one.
    pub fn last(&self) -> Result<Value, RubyError> {
        if self.inclusive {
            return Ok(self.end.clone());
        }
        let (_, end) = self.endpoints()?;
        let predecessor = match end {
            Endpoint::Integer(i) => Endpoint::Integer(i - 1),
            Endpoint::Char(c) => {
                let code = u32::from(c).wrapping_sub(1);
                Endpoint::Char(char::from_u32(code).ok_or_else(|| {
                    type_error("valid Unicode code point", "out-of-range value")
                })?)
            }
        };
        Ok(predecessor.to_value())
    }

    pub fn min(&self) -> Value {
        self.start.clone()
    }

    pub fn max(&self) -> Result<Value, RubyError> {
        self.last()
    }
}
