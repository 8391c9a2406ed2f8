//! Property-based tests for base conversion.

#[cfg(test)]
mod tests {
    use dashu::integer::IBig;
    use proptest::prelude::*;

    use crate::BaseSystem;

    proptest! {
        #[test]
        fn base_round_trip(base in 2u32..=62, magnitude in any::<i64>()) {
            let system = BaseSystem::from_base(base).unwrap();
            let value = IBig::from(magnitude);
            let digits = system.from_decimal(&value).unwrap();
            prop_assert_eq!(system.to_decimal(&digits).unwrap(), value);
        }

        #[test]
        fn base_round_trip_wide(base in 2u32..=62, hi in any::<u64>(), lo in any::<u64>()) {
            let system = BaseSystem::from_base(base).unwrap();
            let value = (IBig::from(hi) << 64) + IBig::from(lo);
            let digits = system.from_decimal(&value).unwrap();
            prop_assert!(system.is_valid(&digits));
            prop_assert_eq!(system.to_decimal(&digits).unwrap(), value);
        }

        #[test]
        fn decimal_alphabet_matches_display(n in any::<i64>()) {
            let system = BaseSystem::from_base(10).unwrap();
            prop_assert_eq!(system.from_decimal(&IBig::from(n)).unwrap(), n.to_string());
        }
    }
}
