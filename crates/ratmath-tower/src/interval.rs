//! Closed rational intervals.
//!
//! A `RationalInterval` is the set `[low, high]` of rationals. Arithmetic
//! is exact interval arithmetic: the result of an operation is the exact
//! image of the operand sets, computed from the endpoints.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use dashu::integer::{IBig, UBig};
use num_traits::{One, Zero};

use crate::limits::ensure_result_fits;
use crate::{ExpansionLimits, Integer, Rational, TowerError};

/// A closed interval `[low, high]` with rational endpoints.
///
/// # Invariants
///
/// - `low <= high`; the constructor swaps reversed endpoints
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RationalInterval {
    low: Rational,
    high: Rational,
}

impl RationalInterval {
    /// Creates an interval from two endpoints in either order.
    #[must_use]
    pub fn new(a: Rational, b: Rational) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Creates the degenerate interval `[value, value]`.
    #[must_use]
    pub fn point(value: Rational) -> Self {
        Self {
            low: value.clone(),
            high: value,
        }
    }

    /// Returns the lower endpoint.
    #[must_use]
    pub fn low(&self) -> &Rational {
        &self.low
    }

    /// Returns the upper endpoint.
    #[must_use]
    pub fn high(&self) -> &Rational {
        &self.high
    }

    /// Returns true if `low == high`.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.low == self.high
    }

    /// Returns true if `value` lies in the interval.
    #[must_use]
    pub fn contains(&self, value: &Rational) -> bool {
        self.low <= *value && *value <= self.high
    }

    /// Returns true if zero lies in the interval.
    #[must_use]
    pub fn contains_zero(&self) -> bool {
        self.low.signum() <= 0 && self.high.signum() >= 0
    }

    /// Returns `high - low`.
    #[must_use]
    pub fn width(&self) -> Rational {
        &self.high - &self.low
    }

    /// Returns the arithmetic midpoint `(low + high) / 2`.
    #[must_use]
    pub fn midpoint(&self) -> Rational {
        (&self.low + &self.high) * Rational::from_i64(1, 2)
    }

    /// Returns the Stern-Brocot mediant of the endpoints.
    ///
    /// This is `(a + c) / (b + d)` for `low = a/b`, `high = c/d`; it always
    /// lies in the interval but is not an average.
    #[must_use]
    pub fn mediant(&self) -> Rational {
        let (low, high) = (self.low.as_inner(), self.high.as_inner());
        Rational::from_parts(
            low.numerator() + high.numerator(),
            low.denominator() + high.denominator(),
        )
    }

    /// Returns true if the two intervals share at least one point.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    /// Returns the union if it is a single interval.
    ///
    /// Intervals merge when they overlap or touch at an endpoint
    /// (`a.high == b.low`). Disjoint intervals yield `None`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            low: self.low.clone().min(other.low.clone()),
            high: self.high.clone().max(other.high.clone()),
        })
    }

    /// Returns the intersection, or `None` if the intervals are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            low: self.low.clone().max(other.low.clone()),
            high: self.high.clone().min(other.high.clone()),
        })
    }

    /// Returns `[1/high, 1/low]`.
    ///
    /// # Errors
    ///
    /// Returns [`TowerError::IntervalContainsZero`] if zero is in the interval.
    pub fn reciprocal(&self) -> Result<Self, TowerError> {
        if self.contains_zero() {
            return Err(TowerError::IntervalContainsZero);
        }
        Ok(Self::new(self.high.reciprocal()?, self.low.reciprocal()?))
    }

    /// Divides by `other`, taking the hull of the four corner quotients.
    ///
    /// # Errors
    ///
    /// Returns [`TowerError::IntervalContainsZero`] if `other` contains zero,
    /// including the degenerate `[0, 0]`.
    pub fn divide(&self, other: &Self) -> Result<Self, TowerError> {
        Ok(self * &other.reciprocal()?)
    }

    /// Analytic power: the exact image `{x^n : x in [low, high]}`.
    ///
    /// For even `n` an interval straddling zero has minimum 0.
    ///
    /// # Errors
    ///
    /// Fails for `n = 0` or negative `n` when the interval contains zero,
    /// and with [`TowerError::TooLarge`] when an endpoint would be too large.
    pub fn pow(&self, n: i64) -> Result<Self, TowerError> {
        if n == 0 {
            if self.contains_zero() {
                return Err(TowerError::ZeroToZero);
            }
            return Ok(Self::point(Rational::one()));
        }
        if n < 0 {
            if self.contains_zero() {
                return Err(TowerError::ZeroToNegativePower);
            }
            return self.pow(n.checked_neg().ok_or(TowerError::TooLarge {
                operation: "exponentiation",
            })?)?
            .reciprocal();
        }

        ensure_result_fits(self.magnitude_bits(), n.unsigned_abs(), "exponentiation")?;
        let exp = usize::try_from(n).map_err(|_| TowerError::TooLarge {
            operation: "exponentiation",
        })?;
        let low = self.low.pow_unsigned(exp);
        let high = self.high.pow_unsigned(exp);

        if exp % 2 == 1 {
            return Ok(Self { low, high });
        }
        if !self.low.is_negative() {
            Ok(Self { low, high })
        } else if !self.high.is_zero() && !self.high.is_negative() {
            Ok(Self {
                low: Rational::zero(),
                high: low.max(high),
            })
        } else {
            Ok(Self {
                low: high,
                high: low,
            })
        }
    }

    fn magnitude_bits(&self) -> usize {
        self.low.magnitude_bits().max(self.high.magnitude_bits())
    }

    /// Multiplicative power: `n` copies of the interval multiplied together.
    ///
    /// Unlike [`RationalInterval::pow`], each factor ranges independently,
    /// so `[-2, 3] ** 2 = [-6, 9]`. Negative `n` gives the reciprocal of
    /// the positive power.
    ///
    /// # Errors
    ///
    /// Fails for `n = 0`, and for negative `n` when the result contains zero.
    pub fn mpow(&self, n: i64) -> Result<Self, TowerError> {
        if n == 0 {
            return Err(TowerError::ZeroMultiplicativeExponent);
        }
        let mut remaining = n.unsigned_abs();
        ensure_result_fits(self.magnitude_bits(), remaining, "multiplicative power")?;

        // Interval multiplication is associative, so square-and-multiply
        // yields the same set as n-1 successive products.
        let mut base = self.clone();
        let mut result: Option<Self> = None;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = Some(match result {
                    Some(acc) => &acc * &base,
                    None => base.clone(),
                });
            }
            remaining >>= 1;
            if remaining > 0 {
                base = &base * &base;
            }
        }
        let result = result.unwrap_or_else(|| self.clone());

        if n < 0 {
            result.reciprocal()
        } else {
            Ok(result)
        }
    }

    /// Finds the value with the fewest base-`base` digits in the interval.
    ///
    /// Tries scales `base^0, base^1, ...` until some multiple of
    /// `1/base^k` lies in `[low, high]`, and returns the one nearest the
    /// midpoint. Returns `None` for `base < 2` or when no scale up to the
    /// default [`ExpansionLimits::max_shortest_decimal_scale`] works
    /// (e.g. a point at `1/3`).
    #[must_use]
    pub fn shortest_decimal(&self, base: u32) -> Option<Rational> {
        self.shortest_decimal_with(base, &ExpansionLimits::default())
    }

    /// Like [`RationalInterval::shortest_decimal`] with explicit limits.
    #[must_use]
    pub fn shortest_decimal_with(&self, base: u32, limits: &ExpansionLimits) -> Option<Rational> {
        if base < 2 {
            return None;
        }
        let radix = UBig::from(base);
        let midpoint = self.midpoint();
        let half = Rational::from_i64(1, 2);
        let mut scale = UBig::ONE;

        for _ in 0..=limits.max_shortest_decimal_scale {
            let factor = Rational::from_integer(Integer::from(IBig::from(scale.clone())));
            let lowest = (&self.low * &factor).ceil();
            let highest = (&self.high * &factor).floor();
            if lowest <= highest {
                let nearest = (&midpoint * &factor + &half).floor();
                let chosen = nearest.max(lowest).min(highest);
                return Some(Rational::from_parts(chosen.into_inner(), scale));
            }
            scale *= &radix;
        }
        None
    }

    /// Formats terminating endpoints in range notation, e.g. `1.5[3,7]`.
    ///
    /// The shared decimal prefix becomes the base and the differing tails
    /// the range. Falls back to `low:high` when an endpoint does not
    /// terminate or the endpoints differ before the decimal point.
    #[must_use]
    pub fn to_uncertainty_string(&self) -> String {
        let negative = self.high.is_negative();
        let straddles = self.low.is_negative() && !negative;
        if self.is_point() || straddles {
            return self.to_string();
        }

        // Work on magnitudes; for negative intervals |high| is the smaller.
        let (small, large) = if negative {
            (self.high.abs(), self.low.abs())
        } else {
            (self.low.clone(), self.high.clone())
        };
        let (Some(small), Some(large)) = (small.terminating_decimal(), large.terminating_decimal())
        else {
            return self.to_string();
        };

        let split = |s: &str| match s.split_once('.') {
            Some((whole, fraction)) => (whole.to_string(), fraction.to_string()),
            None => (s.to_string(), "0".to_string()),
        };
        let (small_whole, small_fraction) = split(&small);
        let (large_whole, large_fraction) = split(&large);
        if small_whole != large_whole {
            return self.to_string();
        }

        let mut common = small_fraction
            .bytes()
            .zip(large_fraction.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        while common > 0 && (common == small_fraction.len() || common == large_fraction.len()) {
            common -= 1;
        }

        let sign = if negative { "-" } else { "" };
        format!(
            "{sign}{small_whole}.{}[{},{}]",
            &small_fraction[..common],
            &small_fraction[common..],
            &large_fraction[common..]
        )
    }
}

/// Writes an endpoint as `n` when whole, otherwise `n/d`.
fn write_endpoint(f: &mut fmt::Formatter<'_>, value: &Rational) -> fmt::Result {
    match value.to_integer() {
        Some(n) => write!(f, "{n}"),
        None => write!(f, "{value}"),
    }
}

impl fmt::Display for RationalInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_endpoint(f, &self.low)?;
        f.write_str(":")?;
        write_endpoint(f, &self.high)
    }
}

impl Add for &RationalInterval {
    type Output = RationalInterval;

    fn add(self, rhs: Self) -> Self::Output {
        RationalInterval {
            low: &self.low + &rhs.low,
            high: &self.high + &rhs.high,
        }
    }
}

impl Add for RationalInterval {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Sub for &RationalInterval {
    type Output = RationalInterval;

    fn sub(self, rhs: Self) -> Self::Output {
        RationalInterval {
            low: &self.low - &rhs.high,
            high: &self.high - &rhs.low,
        }
    }
}

impl Sub for RationalInterval {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Mul for &RationalInterval {
    type Output = RationalInterval;

    fn mul(self, rhs: Self) -> Self::Output {
        let corners = [
            &self.low * &rhs.low,
            &self.low * &rhs.high,
            &self.high * &rhs.low,
            &self.high * &rhs.high,
        ];
        let mut low = corners[0].clone();
        let mut high = corners[0].clone();
        for corner in &corners[1..] {
            if *corner < low {
                low = corner.clone();
            }
            if *corner > high {
                high = corner.clone();
            }
        }
        RationalInterval { low, high }
    }
}

impl Mul for RationalInterval {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Neg for &RationalInterval {
    type Output = RationalInterval;

    fn neg(self) -> Self::Output {
        RationalInterval {
            low: -&self.high,
            high: -&self.low,
        }
    }
}

impl Neg for RationalInterval {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl From<Rational> for RationalInterval {
    fn from(value: Rational) -> Self {
        Self::point(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    fn iv(a: (i64, i64), b: (i64, i64)) -> RationalInterval {
        RationalInterval::new(r(a.0, a.1), r(b.0, b.1))
    }

    #[test]
    fn test_constructor_orders() {
        let x = RationalInterval::new(r(3, 1), r(-1, 2));
        assert_eq!(*x.low(), r(-1, 2));
        assert_eq!(*x.high(), r(3, 1));
    }

    #[test]
    fn test_add_sub() {
        let a = iv((1, 1), (2, 1));
        let b = iv((3, 1), (5, 1));
        assert_eq!(&a + &b, iv((4, 1), (7, 1)));
        assert_eq!(&a - &b, iv((-4, 1), (-1, 1)));
        assert_eq!(-&a, iv((-2, 1), (-1, 1)));
    }

    #[test]
    fn test_mul_sign_changes() {
        let a = iv((-2, 1), (3, 1));
        let b = iv((-1, 1), (4, 1));
        assert_eq!(&a * &b, iv((-8, 1), (12, 1)));
        let c = iv((-3, 1), (-2, 1));
        assert_eq!(&a * &c, iv((-9, 1), (6, 1)));
    }

    #[test]
    fn test_divide() {
        let a = iv((1, 1), (2, 1));
        assert_eq!(a.divide(&iv((2, 1), (4, 1))).unwrap(), iv((1, 4), (1, 1)));
        assert_eq!(
            a.divide(&iv((0, 1), (0, 1))),
            Err(TowerError::IntervalContainsZero)
        );
        assert_eq!(
            a.divide(&iv((-1, 1), (1, 1))),
            Err(TowerError::IntervalContainsZero)
        );
        assert_eq!(
            a.divide(&iv((0, 1), (1, 1))),
            Err(TowerError::IntervalContainsZero)
        );
    }

    #[test]
    fn test_contains_zero() {
        assert!(iv((0, 1), (0, 1)).contains_zero());
        assert!(iv((-1, 1), (0, 1)).contains_zero());
        assert!(iv((0, 1), (1, 1)).contains_zero());
        assert!(!iv((1, 2), (1, 1)).contains_zero());
        assert!(!iv((-1, 1), (-1, 2)).contains_zero());
    }

    #[test]
    fn test_pow() {
        assert_eq!(iv((-2, 1), (3, 1)).pow(2).unwrap(), iv((0, 1), (9, 1)));
        assert_eq!(iv((-3, 1), (2, 1)).pow(2).unwrap(), iv((0, 1), (9, 1)));
        assert_eq!(iv((-3, 1), (-2, 1)).pow(2).unwrap(), iv((4, 1), (9, 1)));
        assert_eq!(iv((-3, 1), (-2, 1)).pow(3).unwrap(), iv((-27, 1), (-8, 1)));
        assert_eq!(iv((2, 1), (3, 1)).pow(-1).unwrap(), iv((1, 3), (1, 2)));
        assert_eq!(iv((2, 1), (3, 1)).pow(0).unwrap(), iv((1, 1), (1, 1)));
        assert_eq!(iv((-1, 1), (3, 1)).pow(0), Err(TowerError::ZeroToZero));
        assert_eq!(
            iv((-1, 1), (3, 1)).pow(-2),
            Err(TowerError::ZeroToNegativePower)
        );
    }

    #[test]
    fn test_mpow() {
        let a = iv((-2, 1), (3, 1));
        assert_eq!(a.mpow(1).unwrap(), a);
        assert_eq!(a.mpow(2).unwrap(), iv((-6, 1), (9, 1)));
        assert_eq!(a.mpow(3).unwrap(), &(&a * &a) * &a);
        assert_eq!(a.mpow(0), Err(TowerError::ZeroMultiplicativeExponent));
        assert_eq!(
            iv((1, 1), (2, 1)).mpow(-2).unwrap(),
            iv((1, 4), (1, 1))
        );
    }

    #[test]
    fn test_oversized_powers_fail() {
        let a = iv((-2, 1), (3, 1));
        assert_eq!(
            a.pow(10_000_000_000_000),
            Err(TowerError::TooLarge {
                operation: "exponentiation"
            })
        );
        assert_eq!(
            a.mpow(10_000_000_000_000),
            Err(TowerError::TooLarge {
                operation: "multiplicative power"
            })
        );
        let unit = iv((-1, 1), (1, 1));
        assert_eq!(unit.mpow(10_000_000_000_000).unwrap(), unit);
    }

    #[test]
    fn test_union_intersection() {
        let a = iv((1, 1), (3, 1));
        let b = iv((2, 1), (5, 1));
        let c = iv((3, 1), (4, 1));
        let d = iv((7, 2), (4, 1));
        assert_eq!(a.union(&b), Some(iv((1, 1), (5, 1))));
        assert_eq!(a.intersection(&b), Some(iv((2, 1), (3, 1))));
        // touching endpoints merge
        assert_eq!(a.union(&c), Some(iv((1, 1), (4, 1))));
        assert_eq!(a.intersection(&c), Some(iv((3, 1), (3, 1))));
        assert_eq!(a.union(&d), None);
        assert_eq!(a.intersection(&d), None);
    }

    #[test]
    fn test_mediant_and_midpoint() {
        let a = iv((1, 2), (2, 3));
        assert_eq!(a.mediant(), r(3, 5));
        assert_eq!(a.midpoint(), r(7, 12));
        assert_eq!(a.width(), r(1, 6));
        assert!(a.contains(&r(3, 5)));
    }

    #[test]
    fn test_shortest_decimal() {
        let a = iv((1, 3), (1, 2));
        assert_eq!(a.shortest_decimal(10), Some(r(2, 5)));
        let b = iv((311, 100), (3142, 1000));
        assert_eq!(b.shortest_decimal(10), Some(r(313, 100)));
        let c = iv((1, 1), (7, 1));
        assert_eq!(c.shortest_decimal(10), Some(r(4, 1)));
        let third = RationalInterval::point(r(1, 3));
        let shallow = ExpansionLimits {
            max_shortest_decimal_scale: 1,
            ..ExpansionLimits::default()
        };
        assert_eq!(b.shortest_decimal_with(10, &shallow), None);
        let deep_enough = ExpansionLimits {
            max_shortest_decimal_scale: 2,
            ..ExpansionLimits::default()
        };
        assert_eq!(b.shortest_decimal_with(10, &deep_enough), Some(r(313, 100)));
        assert_eq!(third.shortest_decimal(3), Some(r(1, 3)));
        assert_eq!(c.shortest_decimal(1), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(iv((1, 2), (3, 4)).to_string(), "1/2:3/4");
        assert_eq!(iv((-2, 1), (3, 1)).to_string(), "-2:3");
    }

    #[test]
    fn test_uncertainty_string() {
        assert_eq!(iv((153, 100), (157, 100)).to_uncertainty_string(), "1.5[3,7]");
        assert_eq!(iv((3, 2), (157, 100)).to_uncertainty_string(), "1.[5,57]");
        assert_eq!(iv((-157, 100), (-153, 100)).to_uncertainty_string(), "-1.5[3,7]");
        assert_eq!(iv((1, 3), (1, 2)).to_uncertainty_string(), "1/3:1/2");
        assert_eq!(iv((3, 2), (5, 2)).to_uncertainty_string(), "3/2:5/2");
    }
}
