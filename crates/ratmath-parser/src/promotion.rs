//! Type promotion between grammar productions.
//!
//! Every production returns a [`Parsed`]: the value plus a
//! [`PromotionHint`] recording how the user wrote it. Promotion narrows
//! a value as far as its hint allows:
//!
//! - a point interval becomes its `Rational`, unless `explicit_interval`
//! - a whole `Rational` becomes an `Integer`, unless `explicit_fraction`
//! - nothing changes when `skip_promotion` is set
//!
//! Arithmetic produces a fresh value with an empty hint.

use ratmath_tower::Number;

/// Notation flags carried alongside a value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PromotionHint {
    /// The value was written as a fraction `a/b`.
    pub explicit_fraction: bool,
    /// The value was written as an interval or uncertainty literal.
    pub explicit_interval: bool,
    /// The value came from `**` and keeps its type as computed.
    pub skip_promotion: bool,
}

impl PromotionHint {
    /// The hint of a literal fraction.
    pub const FRACTION: Self = Self {
        explicit_fraction: true,
        explicit_interval: false,
        skip_promotion: false,
    };

    /// The hint of a literal interval.
    pub const INTERVAL: Self = Self {
        explicit_fraction: false,
        explicit_interval: true,
        skip_promotion: false,
    };

    /// The hint of a multiplicative power.
    pub const SKIP: Self = Self {
        explicit_fraction: false,
        explicit_interval: false,
        skip_promotion: true,
    };
}

/// A value together with its notation hint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed {
    /// The computed value.
    pub value: Number,
    /// How the value was written.
    pub hint: PromotionHint,
}

impl Parsed {
    /// Pairs a value with a hint.
    #[must_use]
    pub fn new(value: Number, hint: PromotionHint) -> Self {
        Self { value, hint }
    }

    /// Wraps a computed value with an empty hint.
    #[must_use]
    pub fn plain(value: Number) -> Self {
        Self::new(value, PromotionHint::default())
    }

    /// Applies promotion and drops the hint.
    #[must_use]
    pub fn promote(self) -> Number {
        promote(self.value, self.hint)
    }

    /// Promotes after a reduction, keeping only the interval flag.
    pub(crate) fn reduced(self) -> Self {
        let hint = PromotionHint {
            explicit_interval: self.hint.explicit_interval,
            ..PromotionHint::default()
        };
        Self::new(self.promote(), hint)
    }
}

/// Narrows `value` as far as `hint` allows.
#[must_use]
pub fn promote(value: Number, hint: PromotionHint) -> Number {
    if hint.skip_promotion {
        return value;
    }

    let value = match value {
        Number::Interval(iv) if iv.is_point() && !hint.explicit_interval => {
            Number::Rational(iv.low().clone())
        }
        other => other,
    };

    let promoted = match value {
        Number::Rational(r) if !hint.explicit_fraction => match r.to_integer() {
            Some(n) => Number::Integer(n),
            None => Number::Rational(r),
        },
        other => other,
    };

    tracing::trace!(?hint, kind = promoted.type_name(), "promoted");
    promoted
}
