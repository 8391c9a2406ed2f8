//! Literal notations.
//!
//! The notation is chosen by lookahead once the leading digits are read:
//!
//! ```text
//! 17          integer
//! 3/4         fraction (digits on both sides of '/')
//! 5..2/3      mixed number
//! 3.~7~15~1   continued fraction [3; 7, 15, 1]
//! 1.25        decimal
//! 1.23#45     repeating decimal, '#0' terminates
//! 1.5[3,7]    range uncertainty        -> [1.53, 1.57]
//! 1.5[+-3]    symmetric uncertainty    -> [1.47, 1.53]
//! 1.5[+3,-2]  asymmetric uncertainty   -> [1.48, 1.53]
//! FF[16]      base-N literal, 2 <= N <= 62
//! a:b         interval of two non-interval literals
//! ```
//!
//! Decimal digit sequences may contain runs written `{d~n}`, meaning `n`
//! copies of digit `d`.

use ratmath_base::BaseSystem;
use ratmath_tower::{Integer, Number, Rational, RationalInterval};

use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::promotion::{Parsed, PromotionHint};

/// Longest run accepted in `{d~n}`.
pub const MAX_RUN_LENGTH: usize = 100_000;

impl Grammar {
    /// Returns true if a literal begins `offset` characters ahead.
    pub(crate) fn literal_starts_at(&self, offset: usize) -> bool {
        match self.cursor.peek_at(offset) {
            Some(ch) if ch.is_ascii_digit() || ch == '.' || ch == '{' => true,
            Some(ch) if ch.is_ascii_alphabetic() => self.base_literal_len(offset).is_some(),
            _ => false,
        }
    }

    /// Returns the length of the number in a `number[base]` literal.
    ///
    /// The number is alphanumeric with at most one `.`, and the bracket
    /// holds only decimal digits.
    fn base_literal_len(&self, offset: usize) -> Option<usize> {
        let mut len = 0;
        let mut seen_point = false;
        while let Some(ch) = self.cursor.peek_at(offset + len) {
            if ch.is_ascii_alphanumeric() {
                len += 1;
            } else if ch == '.' && !seen_point {
                seen_point = true;
                len += 1;
            } else {
                break;
            }
        }
        if len == usize::from(seen_point) || self.cursor.peek_at(offset + len) != Some('[') {
            return None;
        }

        let digits_start = offset + len + 1;
        let mut end = digits_start;
        while self.cursor.peek_at(end).is_some_and(|c| c.is_ascii_digit()) {
            end += 1;
        }
        (end > digits_start && self.cursor.peek_at(end) == Some(']')).then_some(len)
    }

    /// Parses a signed literal, extended to `low:high` when a `:` follows.
    pub(crate) fn parse_literal(&mut self) -> Result<Parsed, ParseError> {
        let low = self.parse_signed_scalar()?;
        if matches!(low.value, Number::Interval(_)) || !self.cursor.eat(':') {
            return Ok(low);
        }

        let position = self.cursor.position();
        let high = self.parse_signed_scalar()?;
        let (Some(low), Some(high)) = (endpoint(&low), endpoint(&high)) else {
            return Err(ParseError::malformed(
                "interval endpoints must be single values",
                position,
            ));
        };
        Ok(Parsed::new(
            Number::Interval(RationalInterval::new(low, high)),
            PromotionHint::INTERVAL,
        ))
    }

    fn parse_signed_scalar(&mut self) -> Result<Parsed, ParseError> {
        let negative = self.cursor.eat('-');
        if !negative {
            self.cursor.eat('+');
        }
        self.parse_scalar(negative)
    }

    fn parse_scalar(&mut self, negative: bool) -> Result<Parsed, ParseError> {
        if self.base_literal_len(0).is_some() {
            return self.parse_base_literal(negative);
        }

        let whole = self.read_digits()?;
        match (self.cursor.peek(), self.cursor.peek_at(1)) {
            (Some('.'), Some('.')) if !whole.is_empty() => {
                self.cursor.eat_str("..");
                self.parse_mixed(&whole, negative)
            }
            (Some('.'), Some('~')) if !whole.is_empty() => {
                self.cursor.eat_str(".~");
                self.parse_continued_fraction(&whole, negative)
            }
            (Some('.'), _) => {
                self.cursor.bump();
                self.parse_decimal(&whole, negative)
            }
            (Some('/'), Some(next)) if next.is_ascii_digit() && !whole.is_empty() => {
                self.cursor.bump();
                let denominator = self.expect_digits("denominator")?;
                let value = Rational::new(integer(&whole)?, integer(&denominator)?)?;
                Ok(Parsed::new(
                    Number::Rational(signed(value, negative)),
                    PromotionHint::FRACTION,
                ))
            }
            (Some('['), _) if !whole.is_empty() => {
                self.cursor.bump();
                self.parse_uncertainty(&whole, "", negative)
            }
            _ if whole.is_empty() => Err(self.unexpected()),
            _ => {
                let value = integer(&whole)?;
                Ok(Parsed::plain(Number::Integer(if negative { -value } else { value })))
            }
        }
    }

    /// Parses `whole..numerator/denominator` after the `..`.
    fn parse_mixed(&mut self, whole: &str, negative: bool) -> Result<Parsed, ParseError> {
        let numerator = self.expect_digits("numerator")?;
        self.expect('/')?;
        let denominator = self.expect_digits("denominator")?;
        let value = Rational::from_integer(integer(whole)?)
            + Rational::new(integer(&numerator)?, integer(&denominator)?)?;
        Ok(Parsed::plain(Number::Rational(signed(value, negative))))
    }

    /// Parses `a0.~a1~a2...` after the `.~`. The sign belongs to `a0`.
    fn parse_continued_fraction(
        &mut self,
        whole: &str,
        negative: bool,
    ) -> Result<Parsed, ParseError> {
        let first = integer(whole)?;
        let mut terms = vec![if negative { -first } else { first }];
        loop {
            let term = self.expect_digits("continued fraction term")?;
            terms.push(integer(&term)?);
            if !self.cursor.eat('~') {
                break;
            }
        }
        let value = Rational::from_continued_fraction(&terms)?;
        Ok(Parsed::plain(Number::Rational(value)))
    }

    /// Parses what follows the `.` of a decimal.
    fn parse_decimal(&mut self, whole: &str, negative: bool) -> Result<Parsed, ParseError> {
        let position = self.cursor.position();
        let fraction = self.read_digits()?;
        match self.cursor.peek() {
            Some('#') => {
                self.cursor.bump();
                let period = self.read_digits()?;
                if period.is_empty() {
                    return Err(ParseError::malformed(
                        "expected period digits after '#'",
                        self.cursor.position(),
                    ));
                }
                let value = repeating_value(whole, &fraction, &period)?;
                Ok(Parsed::plain(Number::Rational(signed(value, negative))))
            }
            Some('[') => {
                self.cursor.bump();
                self.parse_uncertainty(whole, &fraction, negative)
            }
            _ if whole.is_empty() && fraction.is_empty() => {
                Err(ParseError::malformed("expected digits around '.'", position))
            }
            _ => {
                let value = decimal_value(whole, &fraction)?;
                Ok(Parsed::plain(Number::Rational(signed(value, negative))))
            }
        }
    }

    /// Parses the bracket of an uncertainty literal after the `[`.
    ///
    /// Range and offset digits continue one decimal place past the last
    /// digit of the base. An offset containing `.` is taken as written.
    fn parse_uncertainty(
        &mut self,
        whole: &str,
        fraction: &str,
        negative: bool,
    ) -> Result<Parsed, ParseError> {
        let places = fraction.len();
        let base = decimal_value(whole, fraction)?;

        let interval = if self.cursor.eat_str("+-") || self.cursor.eat_str("-+") {
            let offset = self.read_offset(places)?;
            RationalInterval::new(&base - &offset, &base + &offset)
        } else if let Some(first @ ('+' | '-')) = self.cursor.peek() {
            self.cursor.bump();
            let first_offset = self.read_offset(places)?;
            self.expect(',')?;
            let second = if first == '+' { '-' } else { '+' };
            self.expect(second)?;
            let second_offset = self.read_offset(places)?;
            let (up, down) = if first == '+' {
                (first_offset, second_offset)
            } else {
                (second_offset, first_offset)
            };
            RationalInterval::new(&base - &down, &base + &up)
        } else {
            let low = self.expect_digits("range digits")?;
            self.expect(',')?;
            let high = self.expect_digits("range digits")?;
            RationalInterval::new(
                decimal_value(whole, &format!("{fraction}{low}"))?,
                decimal_value(whole, &format!("{fraction}{high}"))?,
            )
        };
        self.expect(']')?;

        let interval = if negative { -interval } else { interval };
        Ok(Parsed::new(Number::Interval(interval), PromotionHint::INTERVAL))
    }

    fn read_offset(&mut self, places: usize) -> Result<Rational, ParseError> {
        let digits = self.expect_digits("offset")?;
        if self.cursor.eat('.') {
            let fraction = self.cursor.take_while(|c| c.is_ascii_digit());
            return decimal_value(&digits, &fraction);
        }
        Ok(Rational::new(
            integer(&digits)?,
            power_of_ten(places + digits.len()),
        )?)
    }

    /// Parses `number[base]`; the lookahead has already matched.
    fn parse_base_literal(&mut self, negative: bool) -> Result<Parsed, ParseError> {
        let position = self.cursor.position();
        let number = self
            .cursor
            .take_while(|c| c.is_ascii_alphanumeric() || c == '.');
        self.expect('[')?;
        let base_text = self.cursor.take_while(|c| c.is_ascii_digit());
        self.expect(']')?;

        let base = base_text
            .parse::<u32>()
            .ok()
            .filter(|b| (2..=62).contains(b))
            .ok_or_else(|| ParseError::InvalidBase {
                base: base_text.clone(),
                position,
            })?;
        let system = BaseSystem::for_radix(base)?;

        let (whole, fraction) = number.split_once('.').unwrap_or((number.as_str(), ""));
        let whole_value = if whole.is_empty() {
            Integer::new(0)
        } else {
            Integer::from(system.to_decimal(whole)?)
        };
        let value = if fraction.is_empty() {
            Number::Integer(whole_value)
        } else {
            let numerator = Integer::from(system.to_decimal(fraction)?);
            let denominator = Integer::new(i64::from(base)).pow_unsigned(fraction.len());
            Number::Rational(
                Rational::from_integer(whole_value) + Rational::new(numerator, denominator)?,
            )
        };

        tracing::trace!(%number, base, %value, "base literal");
        Ok(Parsed::plain(if negative { -value } else { value }))
    }

    /// Reads decimal digits, expanding `{d~n}` runs.
    fn read_digits(&mut self) -> Result<String, ParseError> {
        let mut digits = String::new();
        loop {
            match self.cursor.peek() {
                Some(ch) if ch.is_ascii_digit() => {
                    digits.push(ch);
                    self.cursor.bump();
                }
                Some('{') => self.read_run(&mut digits)?,
                _ => return Ok(digits),
            }
        }
    }

    fn read_run(&mut self, out: &mut String) -> Result<(), ParseError> {
        let position = self.cursor.position();
        self.cursor.bump();
        let digit = self
            .cursor
            .bump()
            .filter(char::is_ascii_digit)
            .ok_or_else(|| ParseError::malformed("expected a digit after '{'", position))?;
        if !self.cursor.eat('~') {
            return Err(ParseError::malformed("expected '~' in digit run", position));
        }
        let count = self.cursor.take_while(|c| c.is_ascii_digit());
        if !self.cursor.eat('}') {
            return Err(ParseError::malformed("expected '}' closing digit run", position));
        }
        let count = count
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=MAX_RUN_LENGTH).contains(n))
            .ok_or_else(|| {
                ParseError::malformed(
                    format!("run length must be between 1 and {MAX_RUN_LENGTH}"),
                    position,
                )
            })?;
        out.extend(std::iter::repeat(digit).take(count));
        Ok(())
    }

    /// Reads a non-empty run of plain decimal digits.
    fn expect_digits(&mut self, what: &str) -> Result<String, ParseError> {
        let position = self.cursor.position();
        let digits = self.cursor.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(ParseError::malformed(format!("expected {what}"), position));
        }
        Ok(digits)
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        if self.cursor.eat(expected) {
            Ok(())
        } else {
            Err(ParseError::malformed(
                format!("expected '{expected}'"),
                self.cursor.position(),
            ))
        }
    }

    fn unexpected(&self) -> ParseError {
        match self.cursor.peek() {
            Some(ch) => ParseError::UnexpectedCharacter {
                ch,
                position: self.cursor.position(),
            },
            None => ParseError::UnexpectedEnd,
        }
    }
}

/// The rational value of a non-interval literal.
fn endpoint(parsed: &Parsed) -> Option<Rational> {
    match &parsed.value {
        Number::Interval(_) => None,
        scalar => scalar.to_rational(),
    }
}

fn signed(value: Rational, negative: bool) -> Rational {
    if negative {
        -value
    } else {
        value
    }
}

fn integer(digits: &str) -> Result<Integer, ParseError> {
    Ok(Integer::from_str_radix(digits, 10)?)
}

fn power_of_ten(exp: usize) -> Integer {
    Integer::new(10).pow_unsigned(exp)
}

/// `whole.fraction` as an exact rational; either part may be empty.
fn decimal_value(whole: &str, fraction: &str) -> Result<Rational, ParseError> {
    let digits = format!("{whole}{fraction}");
    let numerator = if digits.is_empty() {
        Integer::new(0)
    } else {
        integer(&digits)?
    };
    Ok(Rational::new(numerator, power_of_ten(fraction.len()))?)
}

/// `whole.initial#period` as an exact rational.
///
/// With `k` initial digits `I` and `p` period digits `P` the fractional
/// part is `(I (10^p - 1) + P) / (10^k (10^p - 1))`.
fn repeating_value(whole: &str, initial: &str, period: &str) -> Result<Rational, ParseError> {
    let nines = power_of_ten(period.len()) - Integer::new(1);
    let initial_value = if initial.is_empty() {
        Integer::new(0)
    } else {
        integer(initial)?
    };
    let numerator = initial_value * nines.clone() + integer(period)?;
    let fraction = Rational::new(numerator, power_of_ten(initial.len()) * nines)?;
    Ok(decimal_value(whole, "")? + fraction)
}
