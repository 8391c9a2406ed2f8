//! # ratmath-base
//!
//! Numeral alphabets for the ratmath expression language.
//!
//! A [`BaseSystem`] is an ordered set of unique digit characters. Its
//! position in the set is the digit's value, so `"0-9a-f"` describes
//! hexadecimal. This crate provides:
//! - Parsing of character-range sequences (`"0-9a-z"`)
//! - Conversion between digit strings and arbitrary precision integers
//! - Canonical alphabets for the common radixes and Roman numerals
//!
//! Characters that carry meaning in the expression grammar are reserved
//! and can never be digits, see [`RESERVED_SYMBOLS`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod system;

#[cfg(test)]
mod proptests;

pub use error::BaseError;
pub use system::{
    BaseSystem, BASE36, BASE60, BASE62, BINARY, DECIMAL, HEXADECIMAL, OCTAL, RESERVED_SYMBOLS,
    ROMAN,
};
