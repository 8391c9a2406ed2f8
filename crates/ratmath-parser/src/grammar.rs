//! Operator grammar.
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/' | 'E') factor)*
//! factor     := '(' expression ')' postfix
//!             | ('-' | '+') factor
//!             | literal postfix
//! postfix    := ('!!' | '!')? ('^' factor | '**' factor)?
//! ```
//!
//! A sign directly in front of a literal belongs to the literal, so
//! `-2^2` is `(-2)^2` while `-(2)^2` is `-(2^2)`. Because the exponent is
//! a full `factor`, `^` and `**` associate to the right.

use ratmath_tower::Number;

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::promotion::{Parsed, PromotionHint};

/// Recursive-descent evaluator over one input string.
pub(crate) struct Grammar {
    pub(crate) cursor: Cursor,
}

impl Grammar {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            cursor: Cursor::new(text),
        }
    }

    /// Evaluates the whole input as one expression.
    pub(crate) fn parse_complete(&mut self) -> Result<Parsed, ParseError> {
        if self.cursor.is_eof() {
            return Err(ParseError::EmptyExpression);
        }
        let result = self.parse_expression()?;
        match self.cursor.peek() {
            None => Ok(result),
            Some(')') => Err(ParseError::MismatchedParen {
                position: self.cursor.position(),
            }),
            Some(_) => Err(ParseError::TrailingCharacters {
                position: self.cursor.position(),
                rest: self.cursor.rest(),
            }),
        }
    }

    /// Parses addition and subtraction.
    ///
    /// The rule is: `expression := term (('+' | '-') term)*`
    fn parse_expression(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.parse_term()?;
        let mut reduced = false;
        loop {
            let value = if self.cursor.eat('+') {
                let right = self.parse_term()?;
                &left.value + &right.value
            } else if self.cursor.eat('-') {
                let right = self.parse_term()?;
                &left.value - &right.value
            } else {
                break;
            };
            left = Parsed::plain(value);
            reduced = true;
        }
        Ok(if reduced { left.reduced() } else { left })
    }

    /// Parses multiplication, division and scientific notation.
    ///
    /// The rule is: `term := factor (('*' | '/' | 'E') factor)*`
    ///
    /// `m E k` is `m * 10^k` for an integer-valued `k`. An interval
    /// mantissa keeps the result an interval.
    fn parse_term(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.parse_factor()?;
        let mut reduced = false;
        loop {
            let next = match self.cursor.peek() {
                Some('*') if self.cursor.peek_at(1) != Some('*') => {
                    self.cursor.bump();
                    let right = self.parse_factor()?;
                    Parsed::plain(&left.value * &right.value)
                }
                Some('/') => {
                    self.cursor.bump();
                    let right = self.parse_factor()?;
                    Parsed::plain(left.value.divide(&right.value)?)
                }
                Some('E') => {
                    self.cursor.bump();
                    let exponent = self.parse_factor()?;
                    let scale = Number::from(10).pow(&exponent.value)?;
                    let hint = if matches!(left.value, Number::Interval(_)) {
                        PromotionHint::INTERVAL
                    } else {
                        PromotionHint::default()
                    };
                    Parsed::new(&left.value * &scale, hint)
                }
                _ => break,
            };
            left = next;
            reduced = true;
        }
        Ok(if reduced { left.reduced() } else { left })
    }

    /// Parses a parenthesised expression, a unary sign or a literal.
    fn parse_factor(&mut self) -> Result<Parsed, ParseError> {
        let position = self.cursor.position();
        match self.cursor.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some('(') => {
                self.cursor.bump();
                let inner = self.parse_expression()?;
                if !self.cursor.eat(')') {
                    return Err(ParseError::MismatchedParen { position });
                }
                self.parse_postfix(inner)
            }
            Some(sign @ ('-' | '+')) if !self.literal_starts_at(1) => {
                self.cursor.bump();
                let operand = self.parse_factor()?;
                let value = if sign == '-' {
                    -operand.value
                } else {
                    operand.value
                };
                Ok(Parsed::new(value, operand.hint))
            }
            Some('-' | '+') => {
                let literal = self.parse_literal()?;
                self.parse_postfix(literal)
            }
            Some(_) if self.literal_starts_at(0) => {
                let literal = self.parse_literal()?;
                self.parse_postfix(literal)
            }
            Some(ch) => Err(ParseError::UnexpectedCharacter { ch, position }),
        }
    }

    /// Applies an optional factorial, then an optional power.
    ///
    /// The rule is: `postfix := ('!!' | '!')? ('^' factor | '**' factor)?`
    fn parse_postfix(&mut self, operand: Parsed) -> Result<Parsed, ParseError> {
        let mut current = operand;

        if self.cursor.eat_str("!!") {
            current = Parsed::plain(current.value.double_factorial()?);
        } else if self.cursor.eat('!') {
            current = Parsed::plain(current.value.factorial()?);
        }

        if self.cursor.eat_str("**") {
            let exponent = self.parse_factor()?;
            current = Parsed::new(current.value.mpow(&exponent.value)?, PromotionHint::SKIP);
        } else if self.cursor.eat('^') {
            let exponent = self.parse_factor()?;
            current = Parsed::plain(current.value.pow(&exponent.value)?);
        }

        Ok(current)
    }
}
