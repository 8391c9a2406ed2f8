//! Arbitrary precision rational numbers.
//!
//! A rational is kept in canonical form:
//! - The denominator is positive
//! - `gcd(|numerator|, denominator) = 1`
//! - Zero is represented as `0/1`
//!
//! Decimal-expansion analysis lives in [`crate::decimal`] and continued
//! fractions in [`crate::continued`]; both are further `impl Rational`
//! blocks over this type.

use dashu::base::{Abs, BitTest, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::decimal::ExpansionCache;
use crate::limits::ensure_result_fits;
use crate::{Integer, RationalInterval, TowerError};

/// An arbitrary precision rational number.
///
/// Rationals are always stored in lowest terms with a positive denominator.
/// Each value privately memoizes its decimal expansion; the cache never
/// affects equality, ordering or hashing.
#[derive(Default)]
pub struct Rational {
    value: RBig,
    cache: ExpansionCache,
}

impl Rational {
    fn wrap(value: RBig) -> Self {
        Self {
            value,
            cache: ExpansionCache::default(),
        }
    }

    /// Creates a new rational from numerator and denominator.
    ///
    /// The sign is moved to the numerator and the pair is reduced.
    ///
    /// # Errors
    ///
    /// Returns [`TowerError::DivisionByZero`] if the denominator is zero.
    pub fn new(numerator: Integer, denominator: Integer) -> Result<Self, TowerError> {
        if denominator.is_zero() {
            return Err(TowerError::DivisionByZero);
        }
        let (numerator, denominator) = if denominator.is_negative() {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        Ok(Self::wrap(RBig::from_parts(
            numerator.into_inner(),
            denominator.into_inner().unsigned_abs(),
        )))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self::wrap(RBig::from(n.into_inner()))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "denominator cannot be zero");
        Self::wrap(RBig::from_parts(
            IBig::from(numerator) * IBig::from(denominator.signum()),
            UBig::from(denominator.unsigned_abs()),
        ))
    }

    /// Creates a rational from a raw numerator and positive denominator.
    pub(crate) fn from_parts(numerator: IBig, denominator: UBig) -> Self {
        Self::wrap(RBig::from_parts(numerator, denominator))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.value.numerator().clone())
    }

    /// Returns the denominator.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(IBig::from(self.value.denominator().clone()))
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.value.denominator().is_one()
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        if self.is_integer() {
            Some(self.numerator())
        } else {
            None
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::wrap(self.value.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Errors
    ///
    /// Returns [`TowerError::DivisionByZero`] if the rational is zero.
    pub fn reciprocal(&self) -> Result<Self, TowerError> {
        if self.is_zero() {
            return Err(TowerError::DivisionByZero);
        }
        Ok(Self::wrap(self.value.clone().inv()))
    }

    /// Divides by `other`.
    ///
    /// # Errors
    ///
    /// Returns [`TowerError::DivisionByZero`] if `other` is zero.
    pub fn divide(&self, other: &Self) -> Result<Self, TowerError> {
        if other.is_zero() {
            return Err(TowerError::DivisionByZero);
        }
        Ok(Self::wrap(&self.value / &other.value))
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.value.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.value) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.value)
    }

    /// Returns the largest integer not greater than this value.
    #[must_use]
    pub fn floor(&self) -> Integer {
        Integer::from(floor_div(
            self.value.numerator(),
            &IBig::from(self.value.denominator().clone()),
        ))
    }

    /// Returns the smallest integer not less than this value.
    #[must_use]
    pub fn ceil(&self) -> Integer {
        -(-self).floor()
    }

    /// Returns the inner `dashu::RBig`.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.value
    }

    /// Returns a reference to the inner `dashu::RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.value
    }

    pub(crate) fn cache(&self) -> &ExpansionCache {
        &self.cache
    }

    /// Larger bit length of numerator and denominator; `0` and `±1`
    /// count as zero bits.
    pub(crate) fn magnitude_bits(&self) -> usize {
        let numerator = self.value.numerator().clone().unsigned_abs().bit_len();
        let bits = numerator.max(self.value.denominator().bit_len());
        if bits <= 1 {
            0
        } else {
            bits
        }
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow_unsigned(&self, exp: usize) -> Self {
        if exp > 0 && self.magnitude_bits() == 0 {
            return if exp % 2 == 0 { self * self } else { self.clone() };
        }
        Self::wrap(self.value.pow(exp))
    }

    /// Raises to an integer power.
    ///
    /// Negative exponents take the reciprocal first.
    ///
    /// # Errors
    ///
    /// Fails for `0^0`, for zero raised to a negative power, and with
    /// [`TowerError::TooLarge`] when the result would be too large.
    pub fn pow(&self, exp: i64) -> Result<Self, TowerError> {
        if exp == 0 {
            if self.is_zero() {
                return Err(TowerError::ZeroToZero);
            }
            return Ok(Self::one());
        }
        ensure_result_fits(self.magnitude_bits(), exp.unsigned_abs(), "exponentiation")?;
        let magnitude = usize::try_from(exp.unsigned_abs()).map_err(|_| TowerError::TooLarge {
            operation: "exponentiation",
        })?;
        if exp > 0 {
            return Ok(self.pow_unsigned(magnitude));
        }
        if self.is_zero() {
            return Err(TowerError::ZeroToNegativePower);
        }
        Ok(self.reciprocal()?.pow_unsigned(magnitude))
    }

    /// Widens to a point interval.
    #[must_use]
    pub fn to_interval(&self) -> RationalInterval {
        RationalInterval::point(self.clone())
    }

    /// Formats as a mixed number, `whole..numerator/denominator`.
    ///
    /// Proper fractions print as a plain fraction and integers as the
    /// integer; the sign leads the whole string.
    #[must_use]
    pub fn to_mixed_string(&self) -> String {
        if self.is_integer() {
            return self.numerator().to_string();
        }
        let magnitude = self.abs();
        let whole = magnitude.floor();
        let sign = if self.is_negative() { "-" } else { "" };
        let denominator = magnitude.denominator();
        if whole.is_zero() {
            return format!("{sign}{}/{denominator}", magnitude.numerator());
        }
        let remainder = magnitude.numerator() - &whole * &denominator;
        format!("{sign}{whole}..{remainder}/{denominator}")
    }
}

/// Floor division for a positive divisor.
pub(crate) fn floor_div(numerator: &IBig, denominator: &IBig) -> IBig {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if !remainder.is_zero() && (remainder < IBig::ZERO) != (*denominator < IBig::ZERO) {
        quotient - IBig::ONE
    } else {
        quotient
    }
}

// A clone starts with a copy of the memo built so far.
impl Clone for Rational {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Rational {}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::wrap(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::wrap(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.value == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.value)
    }
}

/// Always `numerator/denominator`, including `n/1`, so the output reads
/// back as an explicit fraction.
impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator(), self.denominator())
    }
}

impl FromStr for Rational {
    type Err = TowerError;

    /// Parses `a/b` or a bare integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((numerator, denominator)) => {
                Self::new(numerator.trim().parse()?, denominator.trim().parse()?)
            }
            None => Ok(Self::from_integer(s.trim().parse()?)),
        }
    }
}

// Arithmetic operations
impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::wrap(self.value + rhs.value)
    }
}

impl Add<&Rational> for Rational {
    type Output = Self;

    fn add(self, rhs: &Rational) -> Self::Output {
        Self::wrap(self.value + &rhs.value)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational::wrap(&self.value + &rhs.value)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::wrap(self.value - rhs.value)
    }
}

impl Sub<&Rational> for Rational {
    type Output = Self;

    fn sub(self, rhs: &Rational) -> Self::Output {
        Self::wrap(self.value - &rhs.value)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational::wrap(&self.value - &rhs.value)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::wrap(self.value * rhs.value)
    }
}

impl Mul<&Rational> for Rational {
    type Output = Self;

    fn mul(self, rhs: &Rational) -> Self::Output {
        Self::wrap(self.value * &rhs.value)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational::wrap(&self.value * &rhs.value)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::wrap(-self.value)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational::wrap(-&self.value)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::new(i64::from(n)))
    }
}
