//! Errors raised while building or using a numeral alphabet.

use thiserror::Error;

/// Errors that can occur when defining or applying a [`BaseSystem`](crate::BaseSystem).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BaseError {
    /// The alphabet has fewer than two characters.
    #[error("base system must have at least 2 characters, got {0}")]
    TooFewCharacters(usize),

    /// A character appears more than once in the alphabet.
    #[error("duplicate character '{0}' in base system")]
    DuplicateCharacter(char),

    /// A character is significant to the expression grammar.
    #[error("character '{0}' is reserved and cannot be used as a digit")]
    ReservedCharacter(char),

    /// A range such as `z-a` runs backwards or covers invalid code points.
    #[error("invalid character range '{start}-{end}'")]
    InvalidRange {
        /// First character of the range.
        start: char,
        /// Last character of the range.
        end: char,
    },

    /// A character in the input is not a digit of this alphabet.
    #[error("invalid character '{ch}' for {name}")]
    InvalidDigit {
        /// The offending character.
        ch: char,
        /// Name of the base system.
        name: String,
    },

    /// The digit string is empty.
    #[error("empty digit string")]
    EmptyInput,

    /// The alphabet is a symbol table without place-value semantics.
    #[error("{0} is not a positional numeral system")]
    NotPositional(String),

    /// The requested radix is outside `2..=62`.
    #[error("base must be between 2 and 62, got {0}")]
    UnsupportedBase(u32),
}
