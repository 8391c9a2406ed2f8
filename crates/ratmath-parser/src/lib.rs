//! # ratmath-parser
//!
//! An evaluating recursive-descent parser for exact number notations.
//!
//! The parser reads a single-line expression and returns one value of the
//! numeric tower. There is no syntax tree: each production folds its
//! operands with tower arithmetic as it goes.
//!
//! ```text
//! 3/4 + 5..2/3          -> 77/12
//! (-2:3)^2              -> 0:9
//! 1.5[+-3]              -> 147/100:153/100
//! FF[16] * 1.5E3        -> 382500
//! 3.~7~15~1             -> 355/113
//! ```
//!
//! Results are narrowed after each reduction according to the notation
//! the user wrote; see [`promotion`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod cursor;
pub mod error;
mod grammar;
pub mod literal;
pub mod promotion;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

use ratmath_tower::Number;

pub use error::ParseError;
pub use promotion::{promote, Parsed, PromotionHint};

use grammar::Grammar;

/// Options accepted by [`parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep the narrowest type of each result. When false every result
    /// is returned as a point or proper interval.
    pub type_aware: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { type_aware: true }
    }
}

/// Evaluates `text` to a single tower value.
///
/// Whitespace anywhere in the input is ignored.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed input or a failing operation
/// such as division by zero.
///
/// # Example
///
/// ```
/// use ratmath_parser::{parse, ParseOptions};
///
/// let value = parse("6/4 + 1", &ParseOptions::default()).unwrap();
/// assert_eq!(value.to_string(), "5/2");
/// ```
pub fn parse(text: &str, options: &ParseOptions) -> Result<Number, ParseError> {
    tracing::trace!(input = text, "parse");
    let parsed = Grammar::new(text).parse_complete()?;
    let value = parsed.promote();
    let value = if options.type_aware {
        value
    } else {
        Number::Interval(value.to_interval())
    };
    tracing::trace!(result = %value, "parsed");
    Ok(value)
}

/// A reusable parser holding its options.
#[derive(Clone, Copy, Debug, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Returns the parser's options.
    #[must_use]
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Evaluates `text`; see [`parse`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed input or a failing operation.
    pub fn parse(&self, text: &str) -> Result<Number, ParseError> {
        parse(text, &self.options)
    }
}
