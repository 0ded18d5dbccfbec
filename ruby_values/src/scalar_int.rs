//! `ScalarInt`: Ruby's arbitrary-precision `Integer`.
//!
//! Fast-pathed as a plain `i64` (`Small`) and promoted to a `num_bigint::BigInt` (`Big`) only when
//! an operation would overflow that range, mirroring Ruby's own transparent Fixnum/Bignum
//! promotion — real Ruby never raises on integer overflow, it silently widens. A `Big` value is
//! only ever constructed when it does not fit in `i64`; every arithmetic result is demoted back to
//! `Small` when it fits, so `Small` and `Big` never represent the same number and the derived
//! `PartialEq`/`Hash` below are sound.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// A Ruby `Integer`.
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum ScalarInt {
    Small(i64),
    Big(BigInt),
}

impl ScalarInt {
    pub const ZERO: ScalarInt = ScalarInt::Small(0);
    pub const ONE: ScalarInt = ScalarInt::Small(1);

    #[inline]
    pub const fn new(value: i64) -> Self {
        ScalarInt::Small(value)
    }

    /// The `i64` value, saturating toward `i64::MIN`/`i64::MAX` for a `Big` outside that range.
    /// Meant for peripheral consumers (array/string indexing, `object_id`, hashing) where a
    /// realistic Ruby program never passes a number this large; arithmetic correctness itself
    /// never goes through this path — see `checked_add`/`checked_sub`/`checked_mul`/`checked_neg`,
    /// which promote rather than truncate.
    #[inline]
    pub fn get(&self) -> i64 {
        match self {
            ScalarInt::Small(i) => *i,
            ScalarInt::Big(b) => b.to_i64().unwrap_or_else(|| {
                if *b < BigInt::from(0) {
                    i64::MIN
                } else {
                    i64::MAX
                }
            }),
        }
    }

    fn as_bigint(&self) -> BigInt {
        match self {
            ScalarInt::Small(i) => BigInt::from(*i),
            ScalarInt::Big(b) => b.clone(),
        }
    }

    /// Demote back to `Small` when the value fits, preserving the canonical-representation
    /// invariant.
    fn from_bigint(value: BigInt) -> Self {
        match value.to_i64() {
            Some(i) => ScalarInt::Small(i),
            None => ScalarInt::Big(value),
        }
    }

    fn is_zero(&self) -> bool {
        matches!(self, ScalarInt::Small(0))
    }

    /// Ruby's `Integer#+`: never overflows, promotes to an arbitrary-precision value instead.
    #[inline]
    pub fn checked_add(&self, rhs: &Self) -> Self {
        if let (ScalarInt::Small(a), ScalarInt::Small(b)) = (self, rhs) {
            if let Some(sum) = a.checked_add(*b) {
                return ScalarInt::Small(sum);
            }
        }
        ScalarInt::from_bigint(self.as_bigint() + rhs.as_bigint())
    }

    #[inline]
    pub fn checked_sub(&self, rhs: &Self) -> Self {
        if let (ScalarInt::Small(a), ScalarInt::Small(b)) = (self, rhs) {
            if let Some(diff) = a.checked_sub(*b) {
                return ScalarInt::Small(diff);
            }
        }
        ScalarInt::from_bigint(self.as_bigint() - rhs.as_bigint())
    }

    #[inline]
    pub fn checked_mul(&self, rhs: &Self) -> Self {
        if let (ScalarInt::Small(a), ScalarInt::Small(b)) = (self, rhs) {
            if let Some(product) = a.checked_mul(*b) {
                return ScalarInt::Small(product);
            }
        }
        ScalarInt::from_bigint(self.as_bigint() * rhs.as_bigint())
    }

    /// Ruby's `/` on two integers: floor division (rounds toward negative infinity), not
    /// truncating division. `None` only on division by zero — overflow (`i64::MIN / -1`) promotes
    /// to a `Big` rather than failing.
    pub fn checked_floor_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        if let (ScalarInt::Small(a), ScalarInt::Small(b)) = (self, rhs) {
            if let Some(quotient) = a.checked_div(*b) {
                let remainder = a % b;
                return Some(if remainder != 0 && (remainder < 0) != (*b < 0) {
                    ScalarInt::Small(quotient - 1)
                } else {
                    ScalarInt::Small(quotient)
                });
            }
        }
        let (a, b) = (self.as_bigint(), rhs.as_bigint());
        let quotient = &a / &b;
        let remainder = &a % &b;
        let zero = BigInt::from(0);
        let floor_quotient = if remainder != zero && (remainder < zero) != (b < zero) {
            quotient - 1
        } else {
            quotient
        };
        Some(ScalarInt::from_bigint(floor_quotient))
    }

    /// Ruby's `%`: the remainder takes the sign of the divisor, matching `checked_floor_div`.
    pub fn checked_floor_rem(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        if let (ScalarInt::Small(a), ScalarInt::Small(b)) = (self, rhs) {
            if let Some(remainder) = a.checked_rem(*b) {
                return Some(if remainder != 0 && (remainder < 0) != (*b < 0) {
                    ScalarInt::Small(remainder + b)
                } else {
                    ScalarInt::Small(remainder)
                });
            }
        }
        let (a, b) = (self.as_bigint(), rhs.as_bigint());
        let remainder = &a % &b;
        let zero = BigInt::from(0);
        let floor_remainder = if remainder != zero && (remainder < zero) != (b < zero) {
            &remainder + &b
        } else {
            remainder
        };
        Some(ScalarInt::from_bigint(floor_remainder))
    }

    #[inline]
    pub fn checked_neg(&self) -> Self {
        if let ScalarInt::Small(i) = self {
            if let Some(neg) = i.checked_neg() {
                return ScalarInt::Small(neg);
            }
        }
        ScalarInt::from_bigint(-self.as_bigint())
    }

    #[inline]
    pub fn checked_abs(&self) -> Self {
        if let ScalarInt::Small(i) = self {
            if let Some(abs) = i.checked_abs() {
                return ScalarInt::Small(abs);
            }
        }
        let value = self.as_bigint();
        let zero = BigInt::from(0);
        ScalarInt::from_bigint(if value < zero { -value } else { value })
    }

    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self {
            ScalarInt::Small(i) => {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "Integer-to-Float coercion is inherently lossy above 2^53, matching Ruby"
                )]
                let value = *i as f64;
                value
            }
            ScalarInt::Big(b) => b.to_f64().unwrap_or_else(|| {
                if *b < BigInt::from(0) {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }),
        }
    }
}

impl PartialOrd for ScalarInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScalarInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ScalarInt::Small(a), ScalarInt::Small(b)) => a.cmp(b),
            _ => self.as_bigint().cmp(&other.as_bigint()),
        }
    }
}

/// Euclidean GCD on absolute values, used by `ScalarInt` consumers (Rational construction).
#[inline]
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    #[expect(
        clippy::cast_possible_wrap,
        reason = "gcd of two i64 absolute values fits in i64"
    )]
    let result = a as i64;
    result
}

impl fmt::Debug for ScalarInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for ScalarInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarInt::Small(i) => write!(f, "{i}"),
            ScalarInt::Big(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for ScalarInt {
    fn from(value: i64) -> Self {
        ScalarInt::Small(value)
    }
}
