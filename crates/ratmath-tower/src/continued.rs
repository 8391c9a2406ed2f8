//! Continued fractions.
//!
//! A rational `x` has a finite simple continued fraction
//! `[a0; a1, a2, ..., an]` with `a0` any integer and `ai > 0` for `i >= 1`.
//! The canonical form never ends in a `1` (except for `[1]` itself),
//! since `[..., an, 1] = [..., an + 1]`.
//!
//! Convergents follow the standard recurrence
//!
//! ```text
//! p_k = a_k p_{k-1} + p_{k-2},   p_{-1} = 1, p_{-2} = 0
//! q_k = a_k q_{k-1} + q_{k-2},   q_{-1} = 0, q_{-2} = 1
//! ```

use dashu::integer::IBig;
use num_traits::{One, Zero};

use crate::rational::floor_div;
use crate::{ExpansionLimits, Integer, Rational, TowerError};

impl Rational {
    /// Expands into continued-fraction terms via the Euclidean algorithm.
    ///
    /// Stops after the default [`ExpansionLimits::max_cf_terms`] terms.
    #[must_use]
    pub fn to_continued_fraction(&self) -> Vec<Integer> {
        self.to_continued_fraction_with(&ExpansionLimits::default())
    }

    /// Expands into at most `limits.max_cf_terms` continued-fraction terms.
    #[must_use]
    pub fn to_continued_fraction_with(&self, limits: &ExpansionLimits) -> Vec<Integer> {
        let max_terms = limits.max_cf_terms;
        let mut numerator = self.as_inner().numerator().clone();
        let mut denominator = IBig::from(self.as_inner().denominator().clone());
        let mut terms = Vec::new();

        while !denominator.is_zero() && terms.len() < max_terms {
            let quotient = floor_div(&numerator, &denominator);
            let remainder = &numerator - &quotient * &denominator;
            terms.push(Integer::from(quotient));
            numerator = denominator;
            denominator = remainder;
        }

        collapse_trailing_one(&mut terms);
        terms
    }

    /// Rebuilds a rational from continued-fraction terms.
    ///
    /// # Errors
    ///
    /// Fails if `terms` is empty or any term after the first is not positive.
    pub fn from_continued_fraction(terms: &[Integer]) -> Result<Self, TowerError> {
        let convergents = Self::convergents(terms)?;
        convergents
            .into_iter()
            .last()
            .ok_or_else(|| TowerError::InvalidContinuedFraction("no terms".to_string()))
    }

    /// Returns every convergent `p_k/q_k` of the given terms.
    ///
    /// # Errors
    ///
    /// Fails if `terms` is empty or any term after the first is not positive.
    pub fn convergents(terms: &[Integer]) -> Result<Vec<Self>, TowerError> {
        if terms.is_empty() {
            return Err(TowerError::InvalidContinuedFraction("no terms".to_string()));
        }
        if let Some(bad) = terms[1..].iter().find(|t| t.signum() <= 0) {
            return Err(TowerError::InvalidContinuedFraction(format!(
                "term {bad} must be positive"
            )));
        }

        let (mut p_prev, mut p_prev2) = (Integer::one(), Integer::zero());
        let (mut q_prev, mut q_prev2) = (Integer::zero(), Integer::one());
        let mut result = Vec::with_capacity(terms.len());

        for a in terms {
            let p = a * &p_prev + &p_prev2;
            let q = a * &q_prev + &q_prev2;
            result.push(Self::new(p.clone(), q.clone())?);
            (p_prev2, p_prev) = (p_prev, p);
            (q_prev2, q_prev) = (q_prev, q);
        }

        Ok(result)
    }

    /// Returns the last convergent whose denominator is at most `max_denominator`.
    ///
    /// # Errors
    ///
    /// Fails if `max_denominator` is less than 1.
    pub fn best_approximation(&self, max_denominator: &Integer) -> Result<Self, TowerError> {
        if max_denominator.signum() <= 0 {
            return Err(TowerError::InvalidNumber(format!(
                "maximum denominator {max_denominator} must be positive"
            )));
        }

        let terms = self.to_continued_fraction();
        let mut best = Self::from_integer(self.floor());
        for convergent in Self::convergents(&terms)? {
            if convergent.denominator() > *max_denominator {
                break;
            }
            best = convergent;
        }
        Ok(best)
    }

    /// Formats the continued fraction as `a0.~a1~a2~...`.
    ///
    /// Integers print as just `a0`.
    #[must_use]
    pub fn to_continued_fraction_string(&self) -> String {
        let terms = self.to_continued_fraction();
        let mut out = terms
            .first()
            .map_or_else(|| "0".to_string(), ToString::to_string);
        if terms.len() > 1 {
            out.push('.');
            for term in &terms[1..] {
                out.push('~');
                out.push_str(&term.to_string());
            }
        }
        out
    }
}

/// Folds a final `1` term into its predecessor.
fn collapse_trailing_one(terms: &mut Vec<Integer>) {
    if terms.len() > 1 && terms.last().is_some_and(One::is_one) {
        terms.pop();
        if let Some(last) = terms.last_mut() {
            *last = &*last + &Integer::one();
        }
    }
}
