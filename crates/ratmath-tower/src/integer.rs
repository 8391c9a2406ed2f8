//! Arbitrary precision integers.
//!
//! The narrowest type of the tower. Operations that leave the integers
//! (inexact division, negative powers) widen to [`Rational`] and return a
//! [`Number`].

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::limits::ensure_result_fits;
use crate::{Number, Rational, RationalInterval, TowerError};

/// An arbitrary precision integer.
///
/// This type wraps `dashu::IBig`. Values are immutable; every operation
/// returns a new integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Creates an integer from a string in the given base.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid integer.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, TowerError> {
        IBig::from_str_radix(s, radix)
            .map(Self)
            .map_err(|_| TowerError::InvalidNumber(s.to_string()))
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Computes the greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Computes the least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self(&self.0 / &g.0 * &other.0).abs()
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Attempts to convert to an i64.
    ///
    /// Returns `None` if the value doesn't fit in an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Divides exactly.
    ///
    /// Returns an `Integer` when `other` divides `self`, otherwise the
    /// reduced `Rational`.
    ///
    /// # Errors
    ///
    /// Returns [`TowerError::DivisionByZero`] if `other` is zero.
    pub fn divide(&self, other: &Self) -> Result<Number, TowerError> {
        if other.is_zero() {
            return Err(TowerError::DivisionByZero);
        }
        if (&self.0 % &other.0).is_zero() {
            Ok(Number::Integer(Self(&self.0 / &other.0)))
        } else {
            Rational::new(self.clone(), other.clone()).map(Number::Rational)
        }
    }

    /// Truncated remainder; the sign follows `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TowerError::DivisionByZero`] if `other` is zero.
    pub fn modulo(&self, other: &Self) -> Result<Self, TowerError> {
        if other.is_zero() {
            return Err(TowerError::DivisionByZero);
        }
        Ok(Self(&self.0 % &other.0))
    }

    /// Bit length of the magnitude; `0` and `±1` count as zero bits since
    /// their powers never grow.
    pub(crate) fn magnitude_bits(&self) -> usize {
        let bits = self.0.clone().unsigned_abs().bit_len();
        if bits <= 1 {
            0
        } else {
            bits
        }
    }

    /// Raises to a non-negative power. `0^0` is 1 here; see [`Integer::pow`].
    #[must_use]
    pub fn pow_unsigned(&self, exp: usize) -> Self {
        if exp > 0 && self.magnitude_bits() == 0 {
            // 0, 1 and -1 cycle with period two
            return if exp % 2 == 0 { self * self } else { self.clone() };
        }
        Self(self.0.pow(exp))
    }

    /// Raises to an integer power.
    ///
    /// A negative exponent yields the reciprocal as a `Rational`.
    ///
    /// # Errors
    ///
    /// Fails for `0^0`, for zero raised to a negative power, and with
    /// [`TowerError::TooLarge`] when the result would exceed
    /// [`MAX_RESULT_BITS`](crate::limits::MAX_RESULT_BITS).
    pub fn pow(&self, exp: i64) -> Result<Number, TowerError> {
        if exp == 0 {
            if self.is_zero() {
                return Err(TowerError::ZeroToZero);
            }
            return Ok(Number::Integer(Self::one()));
        }

        ensure_result_fits(self.magnitude_bits(), exp.unsigned_abs(), "exponentiation")?;
        let magnitude = usize::try_from(exp.unsigned_abs()).map_err(|_| TowerError::TooLarge {
            operation: "exponentiation",
        })?;

        if exp > 0 {
            return Ok(Number::Integer(self.pow_unsigned(magnitude)));
        }
        if self.is_zero() {
            return Err(TowerError::ZeroToNegativePower);
        }
        Rational::new(Self::one(), self.pow_unsigned(magnitude)).map(Number::Rational)
    }

    /// Computes `n!`.
    ///
    /// # Errors
    ///
    /// Fails for negative input, or with [`TowerError::TooLarge`] when the
    /// result would exceed [`MAX_RESULT_BITS`](crate::limits::MAX_RESULT_BITS).
    pub fn factorial(&self) -> Result<Self, TowerError> {
        self.stepped_product(1)
    }

    /// Computes `n!! = n (n-2) (n-4) ...`.
    ///
    /// # Errors
    ///
    /// Fails for negative input or a result over the size limit.
    pub fn double_factorial(&self) -> Result<Self, TowerError> {
        self.stepped_product(2)
    }

    fn stepped_product(&self, step: usize) -> Result<Self, TowerError> {
        if self.is_negative() {
            return Err(TowerError::NegativeFactorial);
        }
        let n = self
            .to_i64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(TowerError::TooLarge {
                operation: "factorial",
            })?;
        // n! has fewer than n * bits(n) bits
        let steps = u64::try_from(n / step).unwrap_or(u64::MAX);
        ensure_result_fits(self.magnitude_bits(), steps, "factorial")?;

        let mut product = IBig::ONE;
        let mut k = n;
        while k > 1 {
            product *= IBig::from(k);
            k -= step;
        }
        Ok(Self(product))
    }

    /// Widens to a rational with denominator 1.
    #[must_use]
    pub fn to_rational(&self) -> Rational {
        Rational::from_integer(self.clone())
    }

    /// Widens to a point interval.
    #[must_use]
    pub fn to_interval(&self) -> RationalInterval {
        RationalInterval::point(self.to_rational())
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Integer {
    type Err = TowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

// Arithmetic operations
impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Integer> for Integer {
    type Output = Self;

    fn add(self, rhs: &Integer) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Integer {
    type Output = Integer;

    fn add(self, rhs: Self) -> Self::Output {
        Integer(&self.0 + &rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Integer> for Integer {
    type Output = Self;

    fn sub(self, rhs: &Integer) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Integer {
    type Output = Integer;

    fn sub(self, rhs: Self) -> Self::Output {
        Integer(&self.0 - &rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Integer> for Integer {
    type Output = Self;

    fn mul(self, rhs: &Integer) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Integer {
    type Output = Integer;

    fn mul(self, rhs: Self) -> Self::Output {
        Integer(&self.0 * &rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Integer::new(10);
        let b = Integer::new(3);

        assert_eq!((a.clone() + b.clone()).to_i64(), Some(13));
        assert_eq!((a.clone() - b.clone()).to_i64(), Some(7));
        assert_eq!((a.clone() * b.clone()).to_i64(), Some(30));
        assert_eq!(a.modulo(&b).unwrap().to_i64(), Some(1));
        assert_eq!(Integer::new(-7).modulo(&b).unwrap().to_i64(), Some(-1));
    }

    #[test]
    fn test_divide_promotes() {
        let six = Integer::new(6);
        assert_eq!(
            six.divide(&Integer::new(3)).unwrap(),
            Number::Integer(Integer::new(2))
        );
        assert_eq!(
            six.divide(&Integer::new(4)).unwrap(),
            Number::Rational(Rational::from_i64(3, 2))
        );
        assert_eq!(
            six.divide(&Integer::new(0)),
            Err(TowerError::DivisionByZero)
        );
        assert_eq!(six.modulo(&Integer::new(0)), Err(TowerError::DivisionByZero));
    }

    #[test]
    fn test_gcd() {
        let a = Integer::new(48);
        let b = Integer::new(18);
        assert_eq!(a.gcd(&b).to_i64(), Some(6));
        assert_eq!(a.lcm(&b).to_i64(), Some(144));
        assert_eq!(Integer::new(-4).lcm(&Integer::new(6)).to_i64(), Some(12));
    }

    #[test]
    fn test_pow() {
        let two = Integer::new(2);
        assert_eq!(two.pow(10).unwrap(), Number::Integer(Integer::new(1024)));
        assert_eq!(
            two.pow(-3).unwrap(),
            Number::Rational(Rational::from_i64(1, 8))
        );
        assert_eq!(two.pow(0).unwrap(), Number::Integer(Integer::new(1)));
        assert_eq!(Integer::new(0).pow(0), Err(TowerError::ZeroToZero));
        assert_eq!(
            Integer::new(0).pow(-1),
            Err(TowerError::ZeroToNegativePower)
        );
        assert_eq!(Integer::new(0).pow(5).unwrap(), Number::Integer(Integer::new(0)));
    }

    #[test]
    fn test_oversized_results_fail() {
        let power = TowerError::TooLarge {
            operation: "exponentiation",
        };
        let factorial = TowerError::TooLarge {
            operation: "factorial",
        };
        assert_eq!(Integer::new(2).pow(10_000_000_000_000), Err(power.clone()));
        assert_eq!(Integer::new(10).pow(-99_999_999_999), Err(power));
        let huge = Integer::new(1_000_000_000_000);
        assert_eq!(huge.factorial(), Err(factorial.clone()));
        assert_eq!(huge.double_factorial(), Err(factorial));

        // Units never grow
        assert_eq!(
            Integer::new(-1).pow(10_000_000_000_001).unwrap(),
            Number::Integer(Integer::new(-1))
        );
        assert!(Integer::new(2).pow(1_000_000).is_ok());
    }

    #[test]
    fn test_factorials() {
        assert_eq!(Integer::new(0).factorial().unwrap().to_i64(), Some(1));
        assert_eq!(Integer::new(5).factorial().unwrap().to_i64(), Some(120));
        assert_eq!(Integer::new(7).double_factorial().unwrap().to_i64(), Some(105));
        assert_eq!(Integer::new(8).double_factorial().unwrap().to_i64(), Some(384));
        assert_eq!(Integer::new(0).double_factorial().unwrap().to_i64(), Some(1));
        assert_eq!(
            Integer::new(-1).factorial(),
            Err(TowerError::NegativeFactorial)
        );
        assert_eq!(
            Integer::new(25).factorial().unwrap().to_string(),
            "15511210043330985984000000"
        );
    }

    #[test]
    fn test_large_numbers() {
        let a = Integer::from_str_radix("123456789012345678901234567890", 10).unwrap();
        let b = Integer::from_str_radix("987654321098765432109876543210", 10).unwrap();
        let sum = a + b;
        assert_eq!(sum.to_string(), "1111111110111111111011111111100");
        assert!("12x".parse::<Integer>().is_err());
    }
}
