//! Ruby `Rational`: `{numerator, denominator}`, always simplified, `denominator > 0`.

use crate::errors::{zero_division_error, RubyError};
use crate::scalar_int::gcd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalValue {
    numerator: i64,
    denominator: i64,
}

impl RationalValue {
    /// Construct a simplified, sign-normalized rational. Fails with `ZeroDivisionError` on a
    /// zero denominator.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, RubyError> {
        if denominator == 0 {
            return Err(zero_division_error("Rational"));
        }
        let divisor = gcd(numerator, denominator);
        let divisor = if divisor == 0 { 1 } else { divisor };
        let (mut n, mut d) = (numerator / divisor, denominator / divisor);
        if d < 0 {
            n = -n;
            d = -d;
        }
        Ok(RationalValue {
            numerator: n,
            denominator: d,
        })
    }

    pub fn numerator(self) -> i64 {
        self.numerator
    }

    pub fn denominator(self) -> i64 {
        self.denominator
    }

    pub fn add(self, other: Self) -> Result<Self, RubyError> {
        RationalValue::new(
            self.numerator * other.denominator + other.numerator * self.denominator,
            self.denominator * other.denominator,
        )
    }

    pub fn sub(self, other: Self) -> Result<Self, RubyError> {
        RationalValue::new(
            self.numerator * other.denominator - other.numerator * self.denominator,
            self.denominator * other.denominator,
        )
    }

    pub fn mul(self, other: Self) -> Result<Self, RubyError> {
        RationalValue::new(
            self.numerator * other.numerator,
            self.denominator * other.denominator,
        )
    }

    pub fn div(self, other: Self) -> Result<Self, RubyError> {
        if other.numerator == 0 {
            return Err(zero_division_error("Rational"));
        }
        RationalValue::new(
            self.numerator * other.denominator,
            self.denominator * other.numerator,
        )
    }

    pub fn as_f64(self) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "Rational-to-Float coercion is inherently lossy, matching Ruby"
        )]
        let value = self.numerator as f64 / self.denominator as f64;
        value
    }

    /// `Rational#to_r`: the identity function (see DESIGN.md's Open Question resolution).
    pub fn to_r(self) -> Self {
        self
    }

    /// Equality with a plain Integer holds iff `denominator == 1 && numerator == other`.
    pub fn equals_integer(self, other: i64) -> bool {
        self.denominator == 1 && self.numerator == other
    }
}

impl std::fmt::Display for RationalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn construction_always_simplifies() {
        let r = RationalValue::new(4, 8).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (1, 2));
    }

    #[test]
    fn construction_normalizes_sign_to_denominator_positive() {
        let r = RationalValue::new(1, -2).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (-1, 2));
    }

    #[test]
    fn zero_denominator_is_zero_division() {
        assert!(RationalValue::new(1, 0).is_err());
    }

    #[test]
    fn addition_cross_multiplies_and_resimplifies() {
        let a = RationalValue::new(1, 2).unwrap();
        let b = RationalValue::new(1, 3).unwrap();
        let sum = a.add(b).unwrap();
        assert_eq!((sum.numerator(), sum.denominator()), (5, 6));
    }

    #[test]
    fn scaling_numerator_and_denominator_is_a_no_op_after_simplification() {
        let a = RationalValue::new(1, 2).unwrap();
        for k in [2, 3, -5] {
            let scaled = RationalValue::new(1 * k, 2 * k).unwrap();
            assert_eq!(a, scaled);
        }
    }

    #[test]
    fn gcd_of_numerator_and_denominator_is_always_one() {
        let r = RationalValue::new(6, 9).unwrap();
        assert_eq!(gcd(r.numerator().abs(), r.denominator()), 1);
        assert!(r.denominator() > 0);
    }

    #[test]
    fn to_r_is_identity() {
        let r = RationalValue::new(3, 4).unwrap();
        assert_eq!(r.to_r(), r);
    }
}
