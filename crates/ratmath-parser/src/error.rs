//! Parse errors.

use ratmath_base::BaseError;
use ratmath_tower::TowerError;
use thiserror::Error;

/// Errors raised while evaluating an expression.
///
/// Positions are character offsets into the input after whitespace has
/// been removed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input held nothing but whitespace.
    #[error("empty expression")]
    EmptyExpression,

    /// Input ended where an operand was required.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A character that cannot start an operand.
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// An opening parenthesis without a match, or a stray closing one.
    #[error("unmatched parenthesis at position {position}")]
    MismatchedParen { position: usize },

    /// Input left over after a complete expression.
    #[error("unexpected input \"{rest}\" at position {position}")]
    TrailingCharacters { position: usize, rest: String },

    /// A literal that starts validly but breaks off, such as `1.5[3`.
    #[error("malformed literal at position {position}: {message}")]
    MalformedLiteral { message: String, position: usize },

    /// A `number[base]` literal whose base is outside `2..=62`.
    #[error("base {base} at position {position} is outside 2..=62")]
    InvalidBase { base: String, position: usize },

    /// A tower operation failed.
    #[error(transparent)]
    Arithmetic(#[from] TowerError),

    /// A base-N literal had an invalid digit.
    #[error(transparent)]
    Base(#[from] BaseError),
}

impl ParseError {
    pub(crate) fn malformed(message: impl Into<String>, position: usize) -> Self {
        Self::MalformedLiteral {
            message: message.into(),
            position,
        }
    }
}
