//! Scenario tests for the evaluator.

use ratmath_base::BaseError;
use ratmath_tower::{Integer, Number, Rational, RationalInterval, TowerError};

use crate::{parse, ParseError, ParseOptions, Parser};

fn eval(text: &str) -> Number {
    parse(text, &ParseOptions::default()).unwrap()
}

fn fail(text: &str) -> ParseError {
    parse(text, &ParseOptions::default()).unwrap_err()
}

fn int(n: i64) -> Number {
    Number::Integer(Integer::new(n))
}

fn rat(n: i64, d: i64) -> Number {
    Number::Rational(Rational::from_i64(n, d))
}

fn interval(a: (i64, i64), b: (i64, i64)) -> Number {
    Number::Interval(RationalInterval::new(
        Rational::from_i64(a.0, a.1),
        Rational::from_i64(b.0, b.1),
    ))
}

#[test]
fn test_integer_arithmetic() {
    assert_eq!(eval("1 + 2 * 3"), int(7));
    assert_eq!(eval("(1 + 2) * 3"), int(9));
    assert_eq!(eval("10 - 4 - 3"), int(3));
    assert_eq!(eval("(7) / 2"), rat(7, 2));
    assert_eq!(eval("(8) / 2"), int(4));
    assert_eq!(eval("8/2"), rat(4, 1));
}

#[test]
fn test_spacing_does_not_change_meaning() {
    for (spaced, tight) in [
        ("8 / 2", "8/2"),
        ("2^1 / 2", "2^1/2"),
        ("1 : 2 * 3", "1:2*3"),
        ("1 . 5 [ + - 3 ]", "1.5[+-3]"),
        ("F F [ 1 6 ]", "FF[16]"),
    ] {
        assert_eq!(
            parse(spaced, &ParseOptions::default()),
            parse(tight, &ParseOptions::default()),
            "{spaced}"
        );
    }
    assert_eq!(eval("8 / 2"), rat(4, 1));
}

#[test]
fn test_fractions_and_mixed_numbers() {
    assert_eq!(eval("3/4"), rat(3, 4));
    assert_eq!(eval("5..2/3"), rat(17, 3));
    assert_eq!(eval("-5..2/3"), rat(-17, 3));
    assert_eq!(eval("3/4 + 5..2/3"), rat(77, 12));
    assert_eq!(eval("1/2/2"), rat(1, 4));
}

#[test]
fn test_explicit_fraction_survives() {
    assert_eq!(eval("6/3"), rat(2, 1));
    assert_eq!(eval("6/3").to_string(), "2/1");
    assert_eq!(eval("(6/3)"), rat(2, 1));
    assert_eq!(eval("-(6/3)"), rat(-2, 1));
    assert_eq!(eval("6/3 + 1"), int(3));
    assert_eq!(eval("4/2 * 1"), int(2));
}

#[test]
fn test_decimals() {
    assert_eq!(eval("1.25"), rat(5, 4));
    assert_eq!(eval(".5"), rat(1, 2));
    assert_eq!(eval("1.0"), int(1));
    assert_eq!(eval("-0.75"), rat(-3, 4));
}

#[test]
fn test_repeating_decimals() {
    assert_eq!(eval("1.23#45"), rat(679, 550));
    assert_eq!(eval("0.#3"), rat(1, 3));
    assert_eq!(eval("1.5#0"), rat(3, 2));
    assert_eq!(eval("0.#9"), int(1));
    assert_eq!(eval("-3.#142857"), rat(-22, 7));
}

#[test]
fn test_digit_runs() {
    assert_eq!(eval("1{0~3}"), int(1000));
    assert_eq!(eval("0.{0~2}1"), rat(1, 1000));
    assert_eq!(eval("0.#{3~2}"), rat(1, 3));
}

#[test]
fn test_uncertainty() {
    assert_eq!(eval("1.5[+-3]"), interval((147, 100), (153, 100)));
    assert_eq!(eval("1.5[-+3]"), interval((147, 100), (153, 100)));
    assert_eq!(eval("1.5[3,7]"), interval((153, 100), (157, 100)));
    assert_eq!(eval("1.5[+3,-2]"), interval((148, 100), (153, 100)));
    assert_eq!(eval("1.5[-2,+3]"), interval((148, 100), (153, 100)));
    assert_eq!(eval("1.[5,57]"), interval((3, 2), (157, 100)));
    assert_eq!(eval("1.5[+-0.25]"), interval((5, 4), (7, 4)));
    assert_eq!(eval("-1.5[3,7]"), interval((-157, 100), (-153, 100)));
    assert_eq!(eval("2[+-1]"), interval((19, 10), (21, 10)));
}

#[test]
fn test_uncertainty_formatting_round_trip() {
    let value = eval("1.5[3,7]");
    let Number::Interval(iv) = &value else {
        panic!("expected an interval");
    };
    assert_eq!(iv.to_uncertainty_string(), "1.5[3,7]");
    assert_eq!(eval(&iv.to_uncertainty_string()), value);
}

#[test]
fn test_base_literals() {
    assert_eq!(eval("FF[16]"), int(255));
    assert_eq!(eval("ff[16]"), int(255));
    assert_eq!(eval("-FF[16]"), int(-255));
    assert_eq!(eval("101[2]"), int(5));
    assert_eq!(eval("1.8[16]"), rat(3, 2));
    assert_eq!(eval("Z[62]"), int(61));
    assert_eq!(eval("FF[16] + 1"), int(256));
    assert_eq!(eval("1E[16]"), int(30));
}

#[test]
fn test_base_literal_errors() {
    assert!(matches!(fail("12[63]"), ParseError::InvalidBase { .. }));
    assert!(matches!(fail("12[1]"), ParseError::InvalidBase { .. }));
    assert!(matches!(
        fail("G[16]"),
        ParseError::Base(BaseError::InvalidDigit { ch: 'G', .. })
    ));
}

#[test]
fn test_intervals() {
    assert_eq!(eval("1/2:3/4"), interval((1, 2), (3, 4)));
    assert_eq!(eval("3:1"), interval((1, 1), (3, 1)));
    assert_eq!(eval("-2:-1"), interval((-2, 1), (-1, 1)));
    assert_eq!(eval("1:2 + 3:5"), interval((4, 1), (7, 1)));
    assert_eq!(eval("(-2:3)^2"), interval((0, 1), (9, 1)));
    assert_eq!(eval("(-2:3)**2"), interval((-6, 1), (9, 1)));
    assert_eq!(eval("1:2 * -1"), interval((-2, 1), (-1, 1)));
}

#[test]
fn test_point_interval_promotion() {
    assert_eq!(eval("2:2"), interval((2, 1), (2, 1)));
    assert_eq!(eval("(2:2)"), interval((2, 1), (2, 1)));
    assert_eq!(eval("2:2 + 0"), int(2));
    assert_eq!(eval("1/2:1/2 * 1"), rat(1, 2));
    assert_eq!(eval("(1:1)**3"), interval((1, 1), (1, 1)));
}

#[test]
fn test_interval_division_by_zero() {
    // `2/0` reads as a fraction literal with a zero denominator
    assert_eq!(
        fail("1:2 / 0:0"),
        ParseError::Arithmetic(TowerError::DivisionByZero)
    );
    assert_eq!(
        fail("(1:2) / (0:0)"),
        ParseError::Arithmetic(TowerError::IntervalContainsZero)
    );
    assert_eq!(
        fail("1:2 / -1:1"),
        ParseError::Arithmetic(TowerError::IntervalContainsZero)
    );
    assert_eq!(eval("1:2 / (2:4)"), interval((1, 4), (1, 1)));
}

#[test]
fn test_scientific_notation() {
    assert_eq!(eval("1.5E3"), int(1500));
    assert_eq!(eval("1E-3"), rat(1, 1000));
    assert_eq!(eval("2.5E-1"), rat(1, 4));
    assert_eq!(eval("3.#3E-1"), rat(1, 3));
    assert_eq!(eval("1:2E1"), interval((10, 1), (20, 1)));
    assert_eq!(eval("1:1E0"), interval((1, 1), (1, 1)));
    assert!(matches!(
        fail("1E(1/2)"),
        ParseError::Arithmetic(TowerError::NotAnInteger { .. })
    ));
}

#[test]
fn test_continued_fractions() {
    assert_eq!(eval("3.~7~15~1"), rat(355, 113));
    assert_eq!(eval("3.~7~16"), rat(355, 113));
    assert_eq!(eval("-4.~1~6"), rat(-22, 7));
    assert_eq!(eval("0.~2"), rat(1, 2));
    assert!(matches!(
        fail("1.~0~2"),
        ParseError::Arithmetic(TowerError::InvalidContinuedFraction(_))
    ));
}

#[test]
fn test_powers() {
    assert_eq!(eval("2^10"), int(1024));
    assert_eq!(eval("2^3^2"), int(512));
    assert_eq!(eval("2^-1"), rat(1, 2));
    assert_eq!(eval("(1/2)^2"), rat(1, 4));
    assert_eq!(eval("-2^2"), int(4));
    assert_eq!(eval("-(2)^2"), int(-4));
    assert_eq!(eval("2**3"), int(8));
    assert_eq!(eval("0**2"), int(0));
}

#[test]
fn test_power_errors() {
    let err = fail("0^0");
    assert_eq!(err, ParseError::Arithmetic(TowerError::ZeroToZero));
    assert!(err.to_string().contains("zero raised to zero"));
    assert_eq!(
        fail("0^-1"),
        ParseError::Arithmetic(TowerError::ZeroToNegativePower)
    );
    assert_eq!(
        fail("3**0"),
        ParseError::Arithmetic(TowerError::ZeroMultiplicativeExponent)
    );
    assert!(matches!(
        fail("2^(1/2)"),
        ParseError::Arithmetic(TowerError::NotAnInteger { .. })
    ));
}

#[test]
fn test_oversized_results_are_errors() {
    let too_large =
        |operation: &'static str| ParseError::Arithmetic(TowerError::TooLarge { operation });
    assert_eq!(fail("2^(10^13)"), too_large("exponentiation"));
    assert_eq!(fail("1E99999999999"), too_large("exponentiation"));
    assert_eq!(fail("1000000000000!"), too_large("factorial"));
    assert_eq!(fail("(1:2)**(10^13)"), too_large("multiplicative power"));
    assert_eq!(eval("(-1)^(10^13)"), int(1));
}

#[test]
fn test_factorials() {
    assert_eq!(eval("5!"), int(120));
    assert_eq!(eval("5!!"), int(15));
    assert_eq!(eval("3!^2"), int(36));
    assert_eq!(eval("(4/2)!"), int(2));
    assert_eq!(eval("0!"), int(1));
    assert!(matches!(
        fail("(1/2)!"),
        ParseError::Arithmetic(TowerError::NotAnInteger { .. })
    ));
    assert_eq!(
        fail("(-3)!"),
        ParseError::Arithmetic(TowerError::NegativeFactorial)
    );
}

#[test]
fn test_unary_signs() {
    assert_eq!(eval("--2"), int(2));
    assert_eq!(eval("+3"), int(3));
    assert_eq!(eval("-(1:2)"), interval((-2, 1), (-1, 1)));
    assert_eq!(eval("2*-3"), int(-6));
}

#[test]
fn test_structural_errors() {
    assert_eq!(fail(""), ParseError::EmptyExpression);
    assert_eq!(fail("   "), ParseError::EmptyExpression);
    assert_eq!(fail("(1+2"), ParseError::MismatchedParen { position: 0 });
    assert_eq!(fail("1+2)"), ParseError::MismatchedParen { position: 3 });
    assert_eq!(fail("1+"), ParseError::UnexpectedEnd);
    assert_eq!(
        fail("1x"),
        ParseError::TrailingCharacters {
            position: 1,
            rest: "x".to_string()
        }
    );
    assert_eq!(
        fail("x"),
        ParseError::UnexpectedCharacter { ch: 'x', position: 0 }
    );
    assert_eq!(
        fail("1/0"),
        ParseError::Arithmetic(TowerError::DivisionByZero)
    );
    assert!(matches!(fail("1.5[3"), ParseError::MalformedLiteral { .. }));
    assert!(matches!(fail("1.#"), ParseError::MalformedLiteral { .. }));
    assert!(matches!(fail("5..2"), ParseError::MalformedLiteral { .. }));
    assert!(matches!(fail("1:2[+-1]"), ParseError::MalformedLiteral { .. }));
}

#[test]
fn test_uniform_results() {
    let parser = Parser::new(ParseOptions { type_aware: false });
    assert_eq!(parser.parse("2").unwrap(), interval((2, 1), (2, 1)));
    assert_eq!(parser.parse("1/2").unwrap(), interval((1, 2), (1, 2)));
    assert_eq!(parser.parse("1:2").unwrap(), interval((1, 1), (2, 1)));
    assert!(!parser.options().type_aware);
}

#[test]
fn test_formatted_output_reparses() {
    let x = Rational::from_i64(-100, 3);
    for text in [
        x.to_string(),
        x.to_mixed_string(),
        x.to_repeating_decimal_with_period().decimal,
        x.to_scientific_notation(),
        x.to_continued_fraction_string(),
    ] {
        assert_eq!(eval(&text), Number::Rational(x.clone()), "{text}");
    }
}
