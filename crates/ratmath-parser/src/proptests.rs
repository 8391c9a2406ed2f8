//! Property-based tests for the evaluator.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use ratmath_base::BaseSystem;
    use ratmath_tower::{Integer, Number, Rational, RationalInterval};

    use crate::{parse, ParseOptions};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rational() -> impl Strategy<Value = Rational> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    // Any promoted tower value
    fn number() -> impl Strategy<Value = Number> {
        prop_oneof![
            small_int().prop_map(Number::from),
            rational().prop_map(Number::Rational),
            (rational(), rational())
                .prop_map(|(a, b)| Number::Interval(RationalInterval::new(a, b))),
        ]
    }

    fn eval(text: &str) -> Number {
        parse(text, &ParseOptions::default()).unwrap()
    }

    proptest! {
        #[test]
        fn display_reparses_to_same_type(value in number()) {
            prop_assert_eq!(eval(&value.to_string()), value);
        }

        #[test]
        fn arithmetic_matches_tower(a in small_int(), b in small_int(), c in non_zero_int()) {
            let text = format!("({a}) + ({b}) * ({c})");
            let expected = Integer::new(a) + Integer::new(b) * Integer::new(c);
            prop_assert_eq!(eval(&text), Number::Integer(expected));
        }

        #[test]
        fn division_matches_tower(a in small_int(), b in non_zero_int()) {
            let text = format!("({a}) / ({b})");
            let expected = Integer::new(a).divide(&Integer::new(b)).unwrap();
            prop_assert_eq!(eval(&text), expected);
        }

        #[test]
        fn base_literals_round_trip(base in 2u32..=62, n in -100_000i64..100_000) {
            let system = BaseSystem::from_base(base).unwrap();
            let digits = system.from_decimal(&Integer::new(n).into_inner()).unwrap();
            let text = format!("{digits}[{base}]");
            prop_assert_eq!(eval(&text), Number::from(n));
        }

        #[test]
        fn repeating_notation_reparses(n in small_int(), d in 1i64..23) {
            let x = Rational::from_i64(n, d);
            let decimal = x.to_repeating_decimal_with_period().decimal;
            prop_assert!(!decimal.ends_with("..."));
            prop_assert!(eval(&decimal).value_eq(&Number::Rational(x)));
        }

        #[test]
        fn scientific_and_continued_fraction_reparse(x in rational()) {
            let target = Number::Rational(x.clone());
            prop_assert!(eval(&x.to_scientific_notation()).value_eq(&target));
            prop_assert!(eval(&x.to_continued_fraction_string()).value_eq(&target));
            prop_assert!(eval(&x.to_mixed_string()).value_eq(&target));
        }

        #[test]
        fn uniform_mode_always_gives_intervals(value in number()) {
            let uniform = parse(&value.to_string(), &ParseOptions { type_aware: false }).unwrap();
            prop_assert!(matches!(uniform, Number::Interval(_)));
            prop_assert!(uniform.value_eq(&value));
        }
    }
}
