//! Arithmetic domain errors.

use thiserror::Error;

/// Errors raised by tower arithmetic.
///
/// All of these are immediate failures; no operation substitutes a
/// default value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TowerError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("zero raised to zero is undefined")]
    ZeroToZero,

    #[error("zero cannot be raised to a negative power")]
    ZeroToNegativePower,

    #[error("factorial of a negative integer is undefined")]
    NegativeFactorial,

    #[error("{operation} requires an integer value")]
    NotAnInteger { operation: &'static str },

    #[error("multiplicative power requires a non-zero exponent")]
    ZeroMultiplicativeExponent,

    #[error("division by an interval containing zero")]
    IntervalContainsZero,

    #[error("value too large for {operation}")]
    TooLarge { operation: &'static str },

    #[error("invalid continued fraction: {0}")]
    InvalidContinuedFraction(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),
}
