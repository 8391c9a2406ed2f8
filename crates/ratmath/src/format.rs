//! Output notations.
//!
//! Scalars written in any notation except `Decimal` read back to the same
//! value, provided the repeating part fits the digit budget; a truncated
//! period is marked with `...` and does not parse. Intervals read back in
//! every notation except `Decimal` and `Scientific`: `E` binds looser
//! than `:`, so `a E m : b E n` is not an interval literal.

use ratmath_tower::{Number, Rational};

/// How a value is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Notation {
    /// `n/d`, and `low:high` for intervals.
    #[default]
    Fraction,
    /// `whole..n/d`.
    Mixed,
    /// At most 20 fractional digits, truncated.
    Decimal,
    /// `whole.initial#period`.
    Repeating,
    /// `mantissa E exponent`.
    Scientific,
    /// `a0.~a1~a2`.
    ContinuedFraction,
    /// `1.5[3,7]` for intervals with terminating endpoints.
    Uncertainty,
}

/// Formats `value` in `notation`.
///
/// `digits` is the period digit budget for [`Notation::Repeating`].
/// Intervals are written endpoint by endpoint as `low:high`, except in
/// [`Notation::Uncertainty`].
#[must_use]
pub fn render(value: &Number, notation: Notation, digits: usize) -> String {
    match value {
        Number::Integer(n) if notation == Notation::Scientific => {
            n.to_rational().to_scientific_notation()
        }
        Number::Integer(n) => n.to_string(),
        Number::Rational(r) if notation == Notation::Fraction => r.to_string(),
        Number::Rational(r) => render_rational(r, notation, digits),
        Number::Interval(iv) => match notation {
            Notation::Fraction => iv.to_string(),
            Notation::Uncertainty => iv.to_uncertainty_string(),
            _ => format!(
                "{}:{}",
                render_rational(iv.low(), notation, digits),
                render_rational(iv.high(), notation, digits)
            ),
        },
    }
}

fn render_rational(value: &Rational, notation: Notation, digits: usize) -> String {
    match notation {
        Notation::Fraction | Notation::Uncertainty => match value.to_integer() {
            Some(n) => n.to_string(),
            None => value.to_string(),
        },
        Notation::Mixed => value.to_mixed_string(),
        Notation::Decimal => value.to_decimal(),
        Notation::Repeating => value.to_repeating_decimal_with(digits, true).decimal,
        Notation::Scientific => value.to_scientific_notation(),
        Notation::ContinuedFraction => value.to_continued_fraction_string(),
    }
}
