//! The tagged union over the tower.
//!
//! Binary operations widen the narrower operand first:
//!
//! ```text
//! Integer  op Integer   -> Integer (division may give Rational)
//! Integer  op Rational  -> Rational
//! anything op Interval  -> Interval
//! ```
//!
//! Results are never narrowed here; see [`Number::demote`].

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::{Integer, Rational, RationalInterval, TowerError};

/// A value of the numeric tower.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Number {
    /// An arbitrary precision integer.
    Integer(Integer),
    /// A reduced fraction.
    Rational(Rational),
    /// A closed rational interval.
    Interval(RationalInterval),
}

/// Operands brought to a common type.
enum Widened {
    Integers(Integer, Integer),
    Rationals(Rational, Rational),
    Intervals(RationalInterval, RationalInterval),
}

fn widen(a: &Number, b: &Number) -> Widened {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => Widened::Integers(x.clone(), y.clone()),
        (Number::Interval(_), _) | (_, Number::Interval(_)) => {
            Widened::Intervals(a.to_interval(), b.to_interval())
        }
        _ => Widened::Rationals(a.to_rational_lossless(), b.to_rational_lossless()),
    }
}

impl Number {
    /// Returns a short name for the variant.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Rational(_) => "rational",
            Self::Interval(_) => "interval",
        }
    }

    /// Widens to an interval; scalars become point intervals.
    #[must_use]
    pub fn to_interval(&self) -> RationalInterval {
        match self {
            Self::Integer(n) => n.to_interval(),
            Self::Rational(r) => r.to_interval(),
            Self::Interval(iv) => iv.clone(),
        }
    }

    /// Returns the rational value of a scalar or point interval.
    #[must_use]
    pub fn to_rational(&self) -> Option<Rational> {
        match self {
            Self::Integer(n) => Some(n.to_rational()),
            Self::Rational(r) => Some(r.clone()),
            Self::Interval(iv) if iv.is_point() => Some(iv.low().clone()),
            Self::Interval(_) => None,
        }
    }

    // Only called on non-interval operands.
    fn to_rational_lossless(&self) -> Rational {
        match self {
            Self::Integer(n) => n.to_rational(),
            Self::Rational(r) => r.clone(),
            Self::Interval(iv) => iv.low().clone(),
        }
    }

    /// Returns the integer this value equals, if any.
    ///
    /// Whole rationals and point intervals at a whole number qualify.
    #[must_use]
    pub fn as_integer_value(&self) -> Option<Integer> {
        self.to_rational().and_then(|r| r.to_integer())
    }

    /// Narrows as far as the value allows.
    ///
    /// A point interval becomes a `Rational`, and a whole `Rational`
    /// becomes an `Integer`.
    #[must_use]
    pub fn demote(self) -> Self {
        match self {
            Self::Interval(iv) if iv.is_point() => Self::Rational(iv.low().clone()).demote(),
            Self::Rational(r) => match r.to_integer() {
                Some(n) => Self::Integer(n),
                None => Self::Rational(r),
            },
            other => other,
        }
    }

    /// Compares values across variants: `2`, `2/1` and `2:2` are equal.
    #[must_use]
    pub fn value_eq(&self, other: &Self) -> bool {
        self.to_interval() == other.to_interval()
    }

    /// Divides, widening as needed.
    ///
    /// # Errors
    ///
    /// Fails on a zero divisor or a divisor interval containing zero.
    pub fn divide(&self, other: &Self) -> Result<Self, TowerError> {
        match widen(self, other) {
            Widened::Integers(a, b) => a.divide(&b),
            Widened::Rationals(a, b) => a.divide(&b).map(Self::Rational),
            Widened::Intervals(a, b) => a.divide(&b).map(Self::Interval),
        }
    }

    /// Analytic power. The exponent must be integer-valued.
    ///
    /// # Errors
    ///
    /// Fails for a non-integer exponent, `0^0`, or zero to a negative power.
    pub fn pow(&self, exponent: &Self) -> Result<Self, TowerError> {
        let n = exponent_value(exponent, "exponentiation")?;
        match self {
            Self::Integer(a) => a.pow(n),
            Self::Rational(a) => a.pow(n).map(Self::Rational),
            Self::Interval(a) => a.pow(n).map(Self::Interval),
        }
    }

    /// Multiplicative power: `n` copies multiplied together.
    ///
    /// Agrees with [`Number::pow`] on scalars except that a zero exponent
    /// is rejected outright, so `0**2 = 0` but `x**0` fails for every `x`.
    ///
    /// # Errors
    ///
    /// Fails for a zero or non-integer exponent, or when a negative
    /// exponent needs the reciprocal of zero.
    pub fn mpow(&self, exponent: &Self) -> Result<Self, TowerError> {
        let n = exponent_value(exponent, "multiplicative power")?;
        if n == 0 {
            return Err(TowerError::ZeroMultiplicativeExponent);
        }
        match self {
            Self::Interval(a) => a.mpow(n).map(Self::Interval),
            scalar => scalar.pow(exponent),
        }
    }

    /// Computes `n!` of an integer-valued operand.
    ///
    /// # Errors
    ///
    /// Fails if the value is not an integer or is negative.
    pub fn factorial(&self) -> Result<Self, TowerError> {
        self.integer_operand("factorial")?
            .factorial()
            .map(Self::Integer)
    }

    /// Computes `n!!` of an integer-valued operand.
    ///
    /// # Errors
    ///
    /// Fails if the value is not an integer or is negative.
    pub fn double_factorial(&self) -> Result<Self, TowerError> {
        self.integer_operand("double factorial")?
            .double_factorial()
            .map(Self::Integer)
    }

    fn integer_operand(&self, operation: &'static str) -> Result<Integer, TowerError> {
        self.as_integer_value()
            .ok_or(TowerError::NotAnInteger { operation })
    }
}

/// Extracts a machine-sized integer exponent.
fn exponent_value(exponent: &Number, operation: &'static str) -> Result<i64, TowerError> {
    exponent
        .as_integer_value()
        .ok_or(TowerError::NotAnInteger { operation })?
        .to_i64()
        .ok_or(TowerError::TooLarge { operation })
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Rational(r) => write!(f, "{r}"),
            Self::Interval(iv) => write!(f, "{iv}"),
        }
    }
}

impl Add for &Number {
    type Output = Number;

    fn add(self, rhs: Self) -> Self::Output {
        match widen(self, rhs) {
            Widened::Integers(a, b) => Number::Integer(a + b),
            Widened::Rationals(a, b) => Number::Rational(a + b),
            Widened::Intervals(a, b) => Number::Interval(a + b),
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Sub for &Number {
    type Output = Number;

    fn sub(self, rhs: Self) -> Self::Output {
        match widen(self, rhs) {
            Widened::Integers(a, b) => Number::Integer(a - b),
            Widened::Rationals(a, b) => Number::Rational(a - b),
            Widened::Intervals(a, b) => Number::Interval(a - b),
        }
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Mul for &Number {
    type Output = Number;

    fn mul(self, rhs: Self) -> Self::Output {
        match widen(self, rhs) {
            Widened::Integers(a, b) => Number::Integer(a * b),
            Widened::Rationals(a, b) => Number::Rational(a * b),
            Widened::Intervals(a, b) => Number::Interval(a * b),
        }
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        match self {
            Number::Integer(n) => Number::Integer(-n),
            Number::Rational(r) => Number::Rational(-r),
            Number::Interval(iv) => Number::Interval(-iv),
        }
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl From<Integer> for Number {
    fn from(value: Integer) -> Self {
        Self::Integer(value)
    }
}

impl From<Rational> for Number {
    fn from(value: Rational) -> Self {
        Self::Rational(value)
    }
}

impl From<RationalInterval> for Number {
    fn from(value: RationalInterval) -> Self {
        Self::Interval(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(Integer::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Number {
        Number::from(n)
    }

    fn rat(n: i64, d: i64) -> Number {
        Number::Rational(Rational::from_i64(n, d))
    }

    fn iv(a: i64, b: i64) -> Number {
        Number::Interval(RationalInterval::new(
            Rational::from_i64(a, 1),
            Rational::from_i64(b, 1),
        ))
    }

    #[test]
    fn test_widening() {
        assert_eq!(&int(2) + &int(3), int(5));
        assert_eq!(&int(1) + &rat(1, 2), rat(3, 2));
        assert_eq!(&rat(1, 2) * &int(4), rat(2, 1));
        assert_eq!(&int(1) + &iv(1, 2), iv(2, 3));
        assert_eq!(&rat(1, 2) - &iv(0, 1), Number::Interval(RationalInterval::new(
            Rational::from_i64(-1, 2),
            Rational::from_i64(1, 2),
        )));
    }

    #[test]
    fn test_divide() {
        assert_eq!(int(6).divide(&int(3)).unwrap(), int(2));
        assert_eq!(int(1).divide(&int(3)).unwrap(), rat(1, 3));
        assert_eq!(int(1).divide(&int(0)), Err(TowerError::DivisionByZero));
        assert_eq!(
            iv(1, 2).divide(&iv(0, 0)),
            Err(TowerError::IntervalContainsZero)
        );
        assert_eq!(
            rat(1, 2).divide(&rat(0, 1)),
            Err(TowerError::DivisionByZero)
        );
    }

    #[test]
    fn test_pow_and_mpow() {
        assert_eq!(int(2).pow(&int(10)).unwrap(), int(1024));
        assert_eq!(int(2).pow(&int(-2)).unwrap(), rat(1, 4));
        assert_eq!(int(0).pow(&int(0)), Err(TowerError::ZeroToZero));
        assert_eq!(int(0).mpow(&int(2)).unwrap(), int(0));
        assert_eq!(
            int(3).mpow(&int(0)),
            Err(TowerError::ZeroMultiplicativeExponent)
        );
        assert_eq!(iv(-2, 3).pow(&int(2)).unwrap(), iv(0, 9));
        assert_eq!(iv(-2, 3).mpow(&int(2)).unwrap(), iv(-6, 9));
        assert_eq!(int(4).pow(&rat(4, 2)).unwrap(), int(16));
        assert!(matches!(
            int(4).pow(&rat(1, 2)),
            Err(TowerError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn test_factorials() {
        assert_eq!(int(5).factorial().unwrap(), int(120));
        assert_eq!(rat(6, 1).factorial().unwrap(), int(720));
        assert_eq!(iv(4, 4).factorial().unwrap(), int(24));
        assert_eq!(int(7).double_factorial().unwrap(), int(105));
        assert_eq!(int(0).factorial().unwrap(), int(1));
        assert_eq!(int(-1).factorial(), Err(TowerError::NegativeFactorial));
        assert!(rat(1, 2).factorial().is_err());
        assert!(iv(1, 2).factorial().is_err());
    }

    #[test]
    fn test_demote() {
        assert_eq!(iv(3, 3).demote(), int(3));
        assert_eq!(rat(4, 2).demote(), int(2));
        assert_eq!(rat(1, 2).demote(), rat(1, 2));
        assert_eq!(iv(1, 2).demote(), iv(1, 2));
    }

    #[test]
    fn test_value_eq() {
        assert!(int(2).value_eq(&rat(2, 1)));
        assert!(int(2).value_eq(&iv(2, 2)));
        assert!(!int(2).value_eq(&iv(2, 3)));
        assert_ne!(int(2), rat(2, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(int(-7).to_string(), "-7");
        assert_eq!(rat(3, 4).to_string(), "3/4");
        assert_eq!(iv(-2, 3).to_string(), "-2:3");
    }
}
