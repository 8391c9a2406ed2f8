//! Property-based tests for the tower.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{ExpansionLimits, Integer, Number, Rational, RationalInterval};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rational() -> impl Strategy<Value = Rational> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    fn interval() -> impl Strategy<Value = RationalInterval> {
        (rational(), rational()).prop_map(|(a, b)| RationalInterval::new(a, b))
    }

    proptest! {
        // Integer ring axioms

        #[test]
        fn integer_add_commutative(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(a.clone() + b.clone(), b + a);
        }

        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn integer_divide_exact_or_reduced(a in small_int(), b in non_zero_int()) {
            let quotient = Integer::new(a).divide(&Integer::new(b)).unwrap();
            match quotient {
                Number::Integer(q) => prop_assert_eq!(q * Integer::new(b), Integer::new(a)),
                Number::Rational(r) => prop_assert!(!r.is_integer()),
                Number::Interval(_) => prop_assert!(false, "integer division gave an interval"),
            }
        }

        // Rational normal form

        #[test]
        fn rational_normal_form(
            a in small_int(),
            b in non_zero_int(),
            c in small_int(),
            d in non_zero_int()
        ) {
            let x = Rational::from_i64(a, b);
            let y = Rational::from_i64(c, d);
            for value in [&x + &y, &x - &y, &x * &y] {
                let n = value.numerator();
                let den = value.denominator();
                prop_assert!(den.signum() > 0);
                prop_assert!(n.gcd(&den).is_one());
                if n.is_zero() {
                    prop_assert!(den.is_one());
                }
            }
        }

        #[test]
        fn rational_field_inverse(a in non_zero_int(), b in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            prop_assert_eq!(&x * &x.reciprocal().unwrap(), Rational::one());
        }

        // Continued fractions

        #[test]
        fn continued_fraction_round_trip(a in non_zero_int(), b in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            let terms = x.to_continued_fraction();
            prop_assert_eq!(Rational::from_continued_fraction(&terms).unwrap(), x);
        }

        #[test]
        fn convergents_end_at_value(a in small_int(), b in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            let convergents = Rational::convergents(&x.to_continued_fraction()).unwrap();
            prop_assert_eq!(convergents.last(), Some(&x));
        }

        // Decimal expansion

        #[test]
        fn power_of_ten_denominators_terminate(a in small_int(), k in 0u32..6) {
            let x = Rational::from_i64(a, 10i64.pow(k));
            prop_assert!(x.terminating_decimal().is_some());
            prop_assert_eq!(x.decimal_metadata(0).period_length, 0);
        }

        // Intervals

        #[test]
        fn interval_ordering(a in rational(), b in rational()) {
            let forward = RationalInterval::new(a.clone(), b.clone());
            let backward = RationalInterval::new(b, a);
            prop_assert!(forward.low() <= forward.high());
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn interval_mul_contains_products(x in interval(), y in interval()) {
            let product = &x * &y;
            prop_assert!(product.low() <= product.high());
            for a in [x.low(), x.high()] {
                for b in [y.low(), y.high()] {
                    prop_assert!(product.contains(&(a * b)));
                }
            }
        }

        #[test]
        fn interval_even_pow_is_tight(x in interval()) {
            let square = x.pow(2).unwrap();
            prop_assert!(!square.low().is_negative());
            prop_assert!(square.contains(&(x.low() * x.low())));
            prop_assert!(square.contains(&(x.high() * x.high())));
            prop_assert!(square.contains(&(x.midpoint() * x.midpoint())));
        }

        #[test]
        fn interval_mpow_matches_repeated_product(x in interval(), n in 1i64..5) {
            let mut expected = x.clone();
            for _ in 1..n {
                expected = &expected * &x;
            }
            prop_assert_eq!(x.mpow(n).unwrap(), expected);
        }

        #[test]
        fn shortest_decimal_lies_inside(x in interval()) {
            let shallow = ExpansionLimits {
                max_shortest_decimal_scale: 40,
                ..ExpansionLimits::default()
            };
            if let Some(value) = x.shortest_decimal_with(10, &shallow) {
                prop_assert!(x.contains(&value));
            }
        }

        #[test]
        fn mediant_lies_inside(x in interval()) {
            prop_assert!(x.contains(&x.mediant()));
        }
    }
}
