//! Numeral alphabets.
//!
//! A base system maps each digit character to its value (its index in
//! the alphabet). Alphabets are written as sequences with optional
//! ranges, e.g. `"0-9a-f"` or `"01"`.

use std::sync::{LazyLock, OnceLock};

use dashu::base::UnsignedAbs;
use dashu::integer::{IBig, UBig};
use rustc_hash::FxHashMap;

use crate::BaseError;

/// Characters the expression grammar gives meaning to.
///
/// None of these may be used as a digit, otherwise a literal such as
/// `1-2[3]` would be ambiguous.
pub const RESERVED_SYMBOLS: &[char] = &[
    '+', '-', '*', '/', '^', '!', '(', ')', '[', ']', ':', '.', '#', '~',
];

/// The digits used by the canonical radixes, in value order.
const ALPHANUMERIC: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered alphabet of digit characters.
///
/// # Invariants
///
/// - At least two characters
/// - No character repeats
/// - No character is in [`RESERVED_SYMBOLS`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseSystem {
    name: String,
    characters: Vec<char>,
    char_map: FxHashMap<char, usize>,
    /// Accept the other ASCII case for letters missing from the alphabet.
    fold_case: bool,
    positional: bool,
}

impl BaseSystem {
    /// Creates a base system from a character sequence.
    ///
    /// Ranges are written `a-z` and expand to every code point between the
    /// two ends, inclusive. A `name` of `None` derives one from the size.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence has fewer than two characters,
    /// repeats a character, uses a reserved symbol, or contains a
    /// backwards range.
    pub fn new(sequence: &str, name: Option<&str>) -> Result<Self, BaseError> {
        let characters = expand_sequence(sequence)?;
        if characters.len() < 2 {
            return Err(BaseError::TooFewCharacters(characters.len()));
        }

        let mut char_map = FxHashMap::default();
        for (index, &ch) in characters.iter().enumerate() {
            if RESERVED_SYMBOLS.contains(&ch) {
                return Err(BaseError::ReservedCharacter(ch));
            }
            if char_map.insert(ch, index).is_some() {
                return Err(BaseError::DuplicateCharacter(ch));
            }
        }

        let name = name.map_or_else(
            || format!("Custom Base {}", characters.len()),
            str::to_string,
        );

        Ok(Self {
            name,
            characters,
            char_map,
            fold_case: false,
            positional: true,
        })
    }

    /// Returns a copy of the standard alphabet for `base`; see
    /// [`BaseSystem::for_radix`].
    ///
    /// # Errors
    ///
    /// Returns [`BaseError::UnsupportedBase`] unless `2 <= base <= 62`.
    pub fn from_base(base: u32) -> Result<Self, BaseError> {
        Self::for_radix(base).cloned()
    }

    /// Returns the shared standard alphabet for `base`, a prefix of
    /// `0-9a-zA-Z`.
    ///
    /// Each radix is built once; the named statics such as
    /// [`HEXADECIMAL`] are the instances returned for their radix.
    /// Bases up to 36 only use one letter case and accept either case on
    /// input, so `FF` and `ff` are both hexadecimal 255.
    ///
    /// # Errors
    ///
    /// Returns [`BaseError::UnsupportedBase`] unless `2 <= base <= 62`.
    pub fn for_radix(base: u32) -> Result<&'static Self, BaseError> {
        static OTHER_RADICES: [OnceLock<BaseSystem>; 63] = [const { OnceLock::new() }; 63];

        let system: &'static Self = match base {
            2 => &*BINARY,
            8 => &*OCTAL,
            10 => &*DECIMAL,
            16 => &*HEXADECIMAL,
            36 => &*BASE36,
            60 => &*BASE60,
            62 => &*BASE62,
            3..=61 => OTHER_RADICES[base as usize].get_or_init(|| Self::positional(base)),
            _ => return Err(BaseError::UnsupportedBase(base)),
        };
        Ok(system)
    }

    /// Builds the standard alphabet for `2 <= base <= 62`.
    fn positional(base: u32) -> Self {
        let name = match base {
            2 => "Binary".to_string(),
            8 => "Octal".to_string(),
            10 => "Decimal".to_string(),
            16 => "Hexadecimal".to_string(),
            _ => format!("Base {base}"),
        };
        let digits = &ALPHANUMERIC[..base as usize];
        Self::canonical(&name, digits, base <= 36, true)
    }

    /// Builds one of the built-in alphabets, which are known to be valid.
    fn canonical(name: &str, digits: &str, fold_case: bool, positional: bool) -> Self {
        let characters: Vec<char> = digits.chars().collect();
        let char_map = characters
            .iter()
            .enumerate()
            .map(|(index, &ch)| (ch, index))
            .collect();
        Self {
            name: name.to_string(),
            characters,
            char_map,
            fold_case,
            positional,
        }
    }

    /// Returns the radix, i.e. the number of digit characters.
    #[must_use]
    pub fn base(&self) -> usize {
        self.characters.len()
    }

    /// Returns the digit characters in value order.
    #[must_use]
    pub fn characters(&self) -> &[char] {
        &self.characters
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns false for symbol tables such as Roman numerals.
    #[must_use]
    pub fn is_positional(&self) -> bool {
        self.positional
    }

    /// Returns the value of a single digit character.
    #[must_use]
    pub fn digit_value(&self, ch: char) -> Option<usize> {
        if let Some(&value) = self.char_map.get(&ch) {
            return Some(value);
        }
        if self.fold_case && ch.is_ascii_alphabetic() {
            let swapped = if ch.is_ascii_uppercase() {
                ch.to_ascii_lowercase()
            } else {
                ch.to_ascii_uppercase()
            };
            return self.char_map.get(&swapped).copied();
        }
        None
    }

    /// Returns true if every character (after an optional leading `-`) is a digit.
    #[must_use]
    pub fn is_valid(&self, digits: &str) -> bool {
        let body = digits.strip_prefix('-').unwrap_or(digits);
        !body.is_empty() && body.chars().all(|ch| self.digit_value(ch).is_some())
    }

    /// Converts a digit string in this base to an integer.
    ///
    /// A leading `-` negates the result; it is not part of the alphabet.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, characters outside the alphabet,
    /// or a non-positional alphabet.
    pub fn to_decimal(&self, digits: &str) -> Result<IBig, BaseError> {
        self.ensure_positional()?;
        let (negative, body) = match digits.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, digits),
        };
        if body.is_empty() {
            return Err(BaseError::EmptyInput);
        }

        let radix = IBig::from(self.base());
        let mut value = IBig::ZERO;
        for ch in body.chars() {
            let digit = self.digit_value(ch).ok_or_else(|| BaseError::InvalidDigit {
                ch,
                name: self.name.clone(),
            })?;
            value = value * &radix + IBig::from(digit);
        }

        Ok(if negative { -value } else { value })
    }

    /// Converts an integer to a digit string in this base.
    ///
    /// # Errors
    ///
    /// Returns [`BaseError::NotPositional`] for symbol-table alphabets.
    pub fn from_decimal(&self, value: &IBig) -> Result<String, BaseError> {
        self.ensure_positional()?;
        if *value == IBig::ZERO {
            return Ok(self.characters[0].to_string());
        }

        let radix = UBig::from(self.base());
        let mut magnitude: UBig = value.clone().unsigned_abs();
        let mut digits = Vec::new();
        while magnitude != UBig::ZERO {
            let remainder = &magnitude % &radix;
            magnitude = &magnitude / &radix;
            // remainder < base <= characters.len()
            let index = usize::try_from(remainder).unwrap_or_default();
            digits.push(self.characters[index]);
        }
        if *value < IBig::ZERO {
            digits.push('-');
        }

        Ok(digits.iter().rev().collect())
    }

    fn ensure_positional(&self) -> Result<(), BaseError> {
        if self.positional {
            Ok(())
        } else {
            Err(BaseError::NotPositional(self.name.clone()))
        }
    }
}

/// Expands `a-z` style ranges into a flat list of characters.
fn expand_sequence(sequence: &str) -> Result<Vec<char>, BaseError> {
    let chars: Vec<char> = sequence.chars().collect();
    let mut expanded = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if i + 2 < chars.len() && chars[i + 1] == '-' {
            let (start, end) = (chars[i], chars[i + 2]);
            if start > end {
                return Err(BaseError::InvalidRange { start, end });
            }
            for code in u32::from(start)..=u32::from(end) {
                let ch = char::from_u32(code).ok_or(BaseError::InvalidRange { start, end })?;
                expanded.push(ch);
            }
            i += 3;
        } else {
            expanded.push(chars[i]);
            i += 1;
        }
    }

    Ok(expanded)
}

/// Base 2.
pub static BINARY: LazyLock<BaseSystem> = LazyLock::new(|| BaseSystem::positional(2));

/// Base 8.
pub static OCTAL: LazyLock<BaseSystem> = LazyLock::new(|| BaseSystem::positional(8));

/// Base 10.
pub static DECIMAL: LazyLock<BaseSystem> = LazyLock::new(|| BaseSystem::positional(10));

/// Base 16, lower-case letters; upper case is accepted on input.
pub static HEXADECIMAL: LazyLock<BaseSystem> = LazyLock::new(|| BaseSystem::positional(16));

/// Base 36, digits then lower-case letters.
pub static BASE36: LazyLock<BaseSystem> = LazyLock::new(|| BaseSystem::positional(36));

/// Base 62, digits then lower-case then upper-case letters.
pub static BASE62: LazyLock<BaseSystem> = LazyLock::new(|| BaseSystem::positional(62));

/// Sexagesimal, `0-9a-zA-X`.
pub static BASE60: LazyLock<BaseSystem> = LazyLock::new(|| BaseSystem::positional(60));

/// Roman numeral symbols in value order.
///
/// This is a symbol table only; Roman numerals are additive, not
/// positional, so [`BaseSystem::to_decimal`] and
/// [`BaseSystem::from_decimal`] refuse it.
pub static ROMAN: LazyLock<BaseSystem> =
    LazyLock::new(|| BaseSystem::canonical("Roman Numerals", "IVXLCDM", false, false));
