//! # ratmath-tower
//!
//! The exact numeric tower behind ratmath.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Canonical rationals (`Rational`) with decimal-expansion and
//!   continued-fraction analysis
//! - Closed rational intervals (`RationalInterval`)
//! - The tagged union `Number` that dispatches arithmetic across the
//!   three and widens mixed operands
//!
//! No operation ever produces a floating-point value. Every operation
//! returns a new value; failures are reported through [`TowerError`].
//!
//! ## Tower
//!
//! `Integer ⊂ Rational ⊂ RationalInterval`. Operations on mixed operands
//! widen the narrower side first. Narrowing the result again is left to
//! the caller (the parser applies its own promotion policy).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod continued;
pub mod decimal;
pub mod error;
pub mod integer;
pub mod interval;
pub mod limits;
pub mod number;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use decimal::{DecimalMetadata, RepeatingDecimal};
pub use error::TowerError;
pub use integer::Integer;
pub use interval::RationalInterval;
pub use limits::ExpansionLimits;
pub use number::Number;
pub use rational::Rational;
