//! Decimal expansion of rationals.
//!
//! Every rational has an eventually periodic decimal expansion. For a
//! reduced denominator `d = 2^a 5^b d'` with `gcd(d', 10) = 1`:
//! - the non-repeating segment after the point has `max(a, b)` digits
//! - the expansion terminates iff `d' = 1`
//! - otherwise the period length is the multiplicative order of 10 mod `d'`
//!
//! The structural part (whole part, initial segment, period length) is
//! computed once per value. Period digits come from long division and are
//! extended on demand, so asking for more digits later re-uses the digits
//! already produced.

use std::sync::OnceLock;

use dashu::base::UnsignedAbs;
use dashu::integer::{IBig, UBig};
use num_traits::Zero;
use parking_lot::Mutex;

use crate::limits::MAX_PERIOD_CHECK;
use crate::{ExpansionLimits, Integer, Rational};

/// Facts about the expansion that do not depend on a digit budget.
#[derive(Clone, Debug)]
struct Layout {
    whole: UBig,
    remainder: UBig,
    initial: String,
    /// Remainder after the initial segment; the period starts here.
    tail_remainder: UBig,
    /// `0` when terminating, `-1` when the search hit its cap.
    period_length: i64,
}

/// Period digits produced so far and the long-division state after them.
#[derive(Clone, Debug)]
struct PeriodDigits {
    digits: String,
    remainder: UBig,
}

/// Private per-value memo for the decimal expansion.
///
/// The layout is written once; period digits grow monotonically with the
/// largest budget requested so far.
#[derive(Debug, Default)]
pub(crate) struct ExpansionCache {
    layout: OnceLock<Layout>,
    digits: Mutex<Option<PeriodDigits>>,
}

impl Clone for ExpansionCache {
    fn clone(&self) -> Self {
        Self {
            layout: self.layout.clone(),
            digits: Mutex::new(self.digits.lock().clone()),
        }
    }
}

/// The decimal expansion of a rational's magnitude, up to a digit budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalMetadata {
    /// True if the value is negative.
    pub negative: bool,
    /// Integer part of the magnitude.
    pub whole: Integer,
    /// Magnitude of the numerator modulo the denominator.
    pub remainder: Integer,
    /// Digits after the point that precede the period.
    pub initial_segment: String,
    /// Period digits, at most the requested budget.
    pub period_digits: String,
    /// Length of the period: `0` if terminating, `-1` if not determined.
    pub period_length: i64,
    /// True if the expansion terminates.
    pub terminates: bool,
}

impl DecimalMetadata {
    /// Returns true if `period_digits` holds the whole period.
    #[must_use]
    pub fn has_full_period(&self) -> bool {
        usize::try_from(self.period_length).is_ok_and(|len| len == self.period_digits.len())
    }

    /// Returns the `index`-th digit after the point, if available.
    fn fractional_digit(&self, index: usize) -> Option<char> {
        let initial = self.initial_segment.as_bytes();
        if index < initial.len() {
            return Some(char::from(initial[index]));
        }
        if self.terminates {
            return Some('0');
        }
        let offset = index - initial.len();
        let period = self.period_digits.as_bytes();
        if self.has_full_period() {
            return Some(char::from(period[offset % period.len()]));
        }
        period.get(offset).map(|&b| char::from(b))
    }
}

/// Result of [`Rational::to_repeating_decimal_with_period`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepeatingDecimal {
    /// The value in `whole.initial#period` notation.
    pub decimal: String,
    /// Period length: `0` if terminating, `-1` if not determined.
    pub period: i64,
}

impl Rational {
    fn layout(&self) -> &Layout {
        self.cache()
            .layout
            .get_or_init(|| compute_layout(self, MAX_PERIOD_CHECK))
    }

    /// Returns the decimal expansion with up to `digits` period digits.
    ///
    /// The budget is clamped to the default [`ExpansionLimits`].
    #[must_use]
    pub fn decimal_metadata(&self, digits: usize) -> DecimalMetadata {
        self.decimal_metadata_with(digits, &ExpansionLimits::default())
    }

    /// Like [`Rational::decimal_metadata`] with explicit limits.
    ///
    /// Only the default period-search cap is memoized; other caps
    /// recompute the layout.
    #[must_use]
    pub fn decimal_metadata_with(
        &self,
        digits: usize,
        limits: &ExpansionLimits,
    ) -> DecimalMetadata {
        let budget = limits.clamp_digits(digits);
        let owned;
        let layout = if limits.max_period_check == MAX_PERIOD_CHECK {
            self.layout()
        } else {
            owned = compute_layout(self, limits.max_period_check);
            &owned
        };

        let wanted = match layout.period_length {
            0 => 0,
            -1 => budget,
            len => usize::try_from(len).map_or(budget, |len| len.min(budget)),
        };

        DecimalMetadata {
            negative: self.is_negative(),
            whole: Integer::from(IBig::from(layout.whole.clone())),
            remainder: Integer::from(IBig::from(layout.remainder.clone())),
            initial_segment: layout.initial.clone(),
            period_digits: self.period_digits(layout, wanted),
            period_length: layout.period_length,
            terminates: layout.period_length == 0,
        }
    }

    fn period_digits(&self, layout: &Layout, wanted: usize) -> String {
        if wanted == 0 {
            return String::new();
        }
        let denominator = self.as_inner().denominator();
        let mut memo = self.cache().digits.lock();
        let state = memo.get_or_insert_with(|| PeriodDigits {
            digits: String::new(),
            remainder: layout.tail_remainder.clone(),
        });
        while state.digits.len() < wanted {
            let (digit, next) = long_division_step(&state.remainder, denominator);
            state.digits.push(digit);
            state.remainder = next;
        }
        state.digits[..wanted].to_string()
    }

    /// Returns the exact decimal string if the expansion terminates.
    #[must_use]
    pub fn terminating_decimal(&self) -> Option<String> {
        let meta = self.decimal_metadata(0);
        if !meta.terminates {
            return None;
        }
        let sign = if meta.negative { "-" } else { "" };
        if meta.initial_segment.is_empty() {
            Some(format!("{sign}{}", meta.whole))
        } else {
            Some(format!("{sign}{}.{}", meta.whole, meta.initial_segment))
        }
    }

    /// Formats with at most 20 digits after the point, truncating.
    ///
    /// Terminating values shorter than that print exactly.
    #[must_use]
    pub fn to_decimal(&self) -> String {
        const DIGITS: usize = 20;

        let meta = self.decimal_metadata(DIGITS);
        let length = if meta.terminates {
            meta.initial_segment.len().min(DIGITS)
        } else {
            DIGITS
        };
        let fraction: String = (0..length)
            .map_while(|i| meta.fractional_digit(i))
            .collect();

        let is_zero = meta.whole.is_zero() && fraction.bytes().all(|b| b == b'0');
        let sign = if meta.negative && !is_zero { "-" } else { "" };
        if fraction.is_empty() {
            format!("{sign}{}", meta.whole)
        } else {
            format!("{sign}{}.{fraction}", meta.whole)
        }
    }

    /// Formats in `whole.initial#period` notation with run compression.
    ///
    /// Terminating values end in `#0`; integers print bare.
    #[must_use]
    pub fn to_repeating_decimal_with_period(&self) -> RepeatingDecimal {
        let limits = ExpansionLimits::default();
        self.to_repeating_decimal_with(limits.default_digits, true)
    }

    /// Formats in repeating notation with an explicit digit budget.
    ///
    /// If the period is longer than the budget, or could not be
    /// determined, the available period digits are followed by `...`.
    /// A budget of zero is raised to one digit.
    #[must_use]
    pub fn to_repeating_decimal_with(&self, digits: usize, compress: bool) -> RepeatingDecimal {
        self.to_repeating_decimal_with_limits(digits, compress, &ExpansionLimits::default())
    }

    /// Like [`Rational::to_repeating_decimal_with`] with explicit limits.
    ///
    /// Runs are compressed at `limits.compression_threshold`.
    #[must_use]
    pub fn to_repeating_decimal_with_limits(
        &self,
        digits: usize,
        compress: bool,
        limits: &ExpansionLimits,
    ) -> RepeatingDecimal {
        if self.is_integer() {
            return RepeatingDecimal {
                decimal: self.numerator().to_string(),
                period: 0,
            };
        }

        let meta = self.decimal_metadata_with(digits.max(1), limits);
        let render = |segment: &str| {
            if compress {
                compress_runs(segment, limits.compression_threshold)
            } else {
                segment.to_string()
            }
        };

        let sign = if meta.negative { "-" } else { "" };
        let initial = render(&meta.initial_segment);
        let decimal = if meta.terminates {
            format!("{sign}{}.{initial}#0", meta.whole)
        } else if meta.has_full_period() {
            format!("{sign}{}.{initial}#{}", meta.whole, render(&meta.period_digits))
        } else {
            format!("{sign}{}.{initial}#{}...", meta.whole, meta.period_digits)
        };

        RepeatingDecimal {
            decimal,
            period: meta.period_length,
        }
    }

    /// Formats as `mantissa E exponent` with one non-zero leading digit.
    ///
    /// Repeating mantissas keep `#period` notation, so `1/3` becomes
    /// `3.#3E-1`. If the period is unknown or exceeds the digit ceiling,
    /// the mantissa is truncated and marked with `...`.
    #[must_use]
    pub fn to_scientific_notation(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let limits = ExpansionLimits::default();
        let full = self.layout().period_length >= 0
            && usize::try_from(self.layout().period_length)
                .is_ok_and(|len| len <= limits.max_period_digits);
        let budget = if full {
            usize::try_from(self.layout().period_length).unwrap_or_default()
        } else {
            limits.default_digits
        };
        let meta = self.decimal_metadata_with(budget, &limits);
        let whole = meta.whole.to_string();

        let (lead, mut initial, mut period, exponent) = if whole == "0" {
            let position = (0..)
                .map_while(|i| meta.fractional_digit(i).map(|d| (i, d)))
                .find(|&(_, d)| d != '0')
                .map(|(i, _)| i);
            let Some(position) = position else {
                return self.to_decimal();
            };
            let k = meta.initial_segment.len();
            let lead = meta.fractional_digit(position).unwrap_or('0');
            let (initial, period) = if position < k {
                (
                    meta.initial_segment[position + 1..].to_string(),
                    meta.period_digits.clone(),
                )
            } else if full {
                let len = meta.period_digits.len();
                let start = (position - k + 1) % len;
                let rotated = format!(
                    "{}{}",
                    &meta.period_digits[start..],
                    &meta.period_digits[..start]
                );
                (String::new(), rotated)
            } else {
                (String::new(), meta.period_digits[position - k + 1..].to_string())
            };
            let exponent = -i64::try_from(position + 1).unwrap_or(i64::MAX);
            (lead, initial, period, exponent)
        } else {
            let lead = whole.chars().next().unwrap_or('0');
            let initial = format!("{}{}", &whole[1..], meta.initial_segment);
            let exponent = i64::try_from(whole.len() - 1).unwrap_or(i64::MAX);
            (lead, initial, meta.period_digits.clone(), exponent)
        };

        let sign = if meta.negative { "-" } else { "" };
        let mantissa = if !full {
            format!("{lead}.{initial}{period}...")
        } else if period.is_empty() {
            let trimmed = initial.trim_end_matches('0');
            if trimmed.is_empty() {
                lead.to_string()
            } else {
                format!("{lead}.{trimmed}")
            }
        } else {
            // Shift the period left while it absorbs the initial segment's tail.
            while !initial.is_empty() && initial.chars().last() == period.chars().last() {
                initial.pop();
                let last = period.pop().unwrap_or('0');
                period.insert(0, last);
            }
            format!("{lead}.{initial}#{period}")
        };

        format!("{sign}{mantissa}E{exponent}")
    }
}

fn compute_layout(value: &Rational, max_period_check: u64) -> Layout {
    let inner = value.as_inner();
    let denominator = inner.denominator();
    let magnitude: UBig = inner.numerator().clone().unsigned_abs();
    let whole = &magnitude / denominator;
    let remainder = &magnitude % denominator;

    let (twos, rest) = strip_factor(denominator, 2);
    let (fives, reduced) = strip_factor(&rest, 5);
    let initial_len = twos.max(fives);

    let mut initial = String::with_capacity(initial_len);
    let mut tail_remainder = remainder.clone();
    for _ in 0..initial_len {
        let (digit, next) = long_division_step(&tail_remainder, denominator);
        initial.push(digit);
        tail_remainder = next;
    }

    let period_length = if reduced == UBig::ONE {
        0
    } else {
        multiplicative_order_of_ten(&reduced, max_period_check)
            .and_then(|order| i64::try_from(order).ok())
            .unwrap_or(-1)
    };

    Layout {
        whole,
        remainder,
        initial,
        tail_remainder,
        period_length,
    }
}

/// Removes every factor `p` from `n`, returning the count and the rest.
fn strip_factor(n: &UBig, p: u8) -> (usize, UBig) {
    let p = UBig::from(p);
    let mut count = 0;
    let mut rest = n.clone();
    while !rest.is_zero() && (&rest % &p).is_zero() {
        rest = &rest / &p;
        count += 1;
    }
    (count, rest)
}

/// One step of long division: the next digit and the next remainder.
fn long_division_step(remainder: &UBig, denominator: &UBig) -> (char, UBig) {
    let scaled = remainder * UBig::from(10u8);
    let digit = &scaled / denominator;
    let next = &scaled % denominator;
    // digit < 10 because remainder < denominator
    let digit = u32::try_from(digit).unwrap_or_default();
    (char::from_digit(digit, 10).unwrap_or('0'), next)
}

/// Smallest `k > 0` with `10^k ≡ 1 (mod modulus)`, or `None` past the cap.
///
/// `modulus` must be coprime to 10 and greater than 1.
fn multiplicative_order_of_ten(modulus: &UBig, max_iterations: u64) -> Option<u64> {
    if let Ok(m) = u64::try_from(modulus.clone()) {
        let m = u128::from(m);
        let mut r: u128 = 1;
        for k in 1..=max_iterations {
            r = r * 10 % m;
            if r == 1 {
                return Some(k);
            }
        }
    } else {
        let ten = UBig::from(10u8);
        let mut r = UBig::ONE;
        for k in 1..=max_iterations {
            r = &r * &ten % modulus;
            if r == UBig::ONE {
                return Some(k);
            }
        }
    }
    tracing::debug!(max_iterations, "period search hit its iteration cap");
    None
}

/// Writes runs of at least `threshold` identical digits as `{d~count}`.
#[must_use]
pub fn compress_runs(digits: &str, threshold: usize) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len());
    let mut i = 0;
    while i < bytes.len() {
        let run = bytes[i..].iter().take_while(|&&b| b == bytes[i]).count();
        let digit = char::from(bytes[i]);
        if threshold > 0 && run >= threshold {
            out.push_str(&format!("{{{digit}~{run}}}"));
        } else {
            out.extend(std::iter::repeat(digit).take(run));
        }
        i += run;
    }
    out
}
