//! Ceilings for the loops that can run long.
//!
//! Every tower operation terminates on its own, but period search,
//! period-digit generation and continued-fraction expansion scale with
//! the size of the denominator. These limits bound them.
//!
//! Powers and factorials are bounded separately by [`MAX_RESULT_BITS`],
//! checked before any work is done.

use crate::TowerError;

/// Maximum iterations of the multiplicative-order search.
pub const MAX_PERIOD_CHECK: u64 = 10_000_000;

/// Maximum number of period digits produced by long division.
pub const MAX_PERIOD_DIGITS: usize = 1000;

/// Digit budget used when the caller does not supply one.
pub const DEFAULT_PERIOD_DIGITS: usize = 20;

/// Maximum number of continued-fraction terms.
pub const MAX_CONTINUED_FRACTION_TERMS: usize = 1000;

/// Shortest run of identical digits written as `{d~count}`.
pub const COMPRESSION_THRESHOLD: usize = 8;

/// Largest power of the base tried by `RationalInterval::shortest_decimal`.
pub const MAX_SHORTEST_DECIMAL_SCALE: usize = 1000;

/// Largest result, in bits, that a power or factorial may produce.
///
/// About 315,000 decimal digits.
pub const MAX_RESULT_BITS: u64 = 1 << 20;

/// Configuration for decimal and continued-fraction analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// Iteration cap for the period-length search.
    pub max_period_check: u64,
    /// Upper bound on any requested period-digit budget.
    pub max_period_digits: usize,
    /// Budget used by the formatting helpers.
    pub default_digits: usize,
    /// Maximum number of continued-fraction terms.
    pub max_cf_terms: usize,
    /// Minimum run length for `{d~count}` compression.
    pub compression_threshold: usize,
    /// Maximum exponent tried when searching for a shortest decimal.
    pub max_shortest_decimal_scale: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_period_check: MAX_PERIOD_CHECK,
            max_period_digits: MAX_PERIOD_DIGITS,
            default_digits: DEFAULT_PERIOD_DIGITS,
            max_cf_terms: MAX_CONTINUED_FRACTION_TERMS,
            compression_threshold: COMPRESSION_THRESHOLD,
            max_shortest_decimal_scale: MAX_SHORTEST_DECIMAL_SCALE,
        }
    }
}

impl ExpansionLimits {
    /// Clamps a requested digit budget to `max_period_digits`.
    #[must_use]
    pub fn clamp_digits(&self, requested: usize) -> usize {
        if requested > self.max_period_digits {
            tracing::debug!(
                requested,
                max = self.max_period_digits,
                "digit budget clamped"
            );
        }
        requested.min(self.max_period_digits)
    }
}

/// Fails when `count` factors of at most `bits` bits each could exceed
/// [`MAX_RESULT_BITS`].
pub(crate) fn ensure_result_fits(
    bits: usize,
    count: u64,
    operation: &'static str,
) -> Result<(), TowerError> {
    let bits = u64::try_from(bits).unwrap_or(u64::MAX);
    let estimate = u128::from(bits) * u128::from(count);
    if estimate > u128::from(MAX_RESULT_BITS) {
        tracing::debug!(bits, count, operation, "result size over limit");
        return Err(TowerError::TooLarge { operation });
    }
    Ok(())
}
