//! Property-based tests for currency conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{CurrencyRate, convert};

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate positive multipliers (0.01 to 10000).
fn positive_multiplier() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

fn currency(code: &str, rate: Decimal, multiplier: Decimal) -> CurrencyRate {
    CurrencyRate::new(code.to_string(), rate, multiplier)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting a currency into itself is always the untouched amount.
    #[test]
    fn prop_identity_conversion(
        amount in positive_amount(),
        rate in positive_rate(),
        multiplier in positive_multiplier(),
    ) {
        let from = currency("XXX", rate, multiplier);
        let to = currency("XXX", rate, multiplier);
        prop_assert_eq!(convert(amount, &from, &to), amount);
    }

    /// Positive amounts with positive rates never convert to zero or below,
    /// so a credit can never destroy or negate money.
    #[test]
    fn prop_positive_amounts_stay_positive(
        amount in positive_amount(),
        from_rate in positive_rate(),
        to_rate in positive_rate(),
        from_mult in positive_multiplier(),
        to_mult in positive_multiplier(),
    ) {
        let from = currency("AAA", from_rate, from_mult);
        let to = currency("BBB", to_rate, to_mult);
        prop_assert!(convert(amount, &from, &to) > Decimal::ZERO);
    }

    /// Conversion is monotone in the amount for a fixed currency pair.
    #[test]
    fn prop_monotone_in_amount(
        amount in positive_amount(),
        extra in positive_amount(),
        from_rate in positive_rate(),
        to_rate in positive_rate(),
        from_mult in positive_multiplier(),
        to_mult in positive_multiplier(),
    ) {
        let from = currency("AAA", from_rate, from_mult);
        let to = currency("BBB", to_rate, to_mult);
        prop_assert!(convert(amount + extra, &from, &to) >= convert(amount, &from, &to));
    }
}
