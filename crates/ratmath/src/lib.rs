//! # ratmath
//!
//! Exact arithmetic over integers, rationals and closed rational
//! intervals, driven by a small expression language.
//!
//! No value is ever approximated: decimals, repeating decimals,
//! uncertainty ranges and continued fractions are all read as exact
//! rationals or intervals.
//!
//! ## Crates
//!
//! - [`base`]: numeral alphabets for base-N literals
//! - [`tower`]: `Integer`, `Rational`, `RationalInterval` and the `Number` union
//! - [`parser`]: the evaluating parser
//!
//! ## Quick Start
//!
//! ```rust
//! use ratmath::prelude::*;
//!
//! let value = parse("1.23#45 + 5..2/3", &ParseOptions::default()).unwrap();
//! assert_eq!(render(&value, Notation::Mixed, 20), "6..1487/1650");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod format;

pub use ratmath_base as base;
pub use ratmath_parser as parser;
pub use ratmath_tower as tower;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::format::{render, Notation};
    pub use ratmath_base::BaseSystem;
    pub use ratmath_parser::{parse, ParseError, ParseOptions, Parser};
    pub use ratmath_tower::{
        ExpansionLimits, Integer, Number, Rational, RationalInterval, TowerError,
    };
}
