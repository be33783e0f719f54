//! Property-based tests for the pricing engine.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::{PEAK_HOUR_SURCHARGE_PER_TON, WEEKEND_DISCOUNT_RATE, is_peak_hour, is_weekend, quote};
use crate::lifecycle::PaymentMethod;

/// Sand weights that land inside a tier (whole tenths avoid the
/// literal 5.0/5.1 and 15.0/15.1 schedule gaps).
fn in_tier_weight() -> impl Strategy<Value = Decimal> {
    (5i64..=300).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0u32..=27, 0u32..24, 0u32..60).prop_map(|(day, hour, minute)| {
        NaiveDate::from_ymd_opt(2024, 7, day + 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The breakdown always reconciles: final price equals
    /// base + surcharge - discount rounded to the cent.
    #[test]
    fn prop_breakdown_reconciles(sand in in_tier_weight(), when in timestamp()) {
        let b = quote(sand, when, PaymentMethod::Cash).unwrap();
        let expected = (b.base_price + b.peak_hour_surcharge - b.weekend_discount)
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(b.final_price, expected);
    }

    /// Surcharge is exactly sand x 10 in peak windows and 0 outside.
    #[test]
    fn prop_surcharge_matches_window(sand in in_tier_weight(), when in timestamp()) {
        let b = quote(sand, when, PaymentMethod::Cash).unwrap();
        let expected = if is_peak_hour(when) {
            sand * PEAK_HOUR_SURCHARGE_PER_TON
        } else {
            Decimal::ZERO
        };
        prop_assert_eq!(b.peak_hour_surcharge, expected);
    }

    /// Discount is 5% of base on weekends, 0 on weekdays, and never
    /// touches the surcharge.
    #[test]
    fn prop_discount_is_base_only(sand in in_tier_weight(), when in timestamp()) {
        let b = quote(sand, when, PaymentMethod::BankTransfer).unwrap();
        let expected = if is_weekend(when) {
            b.base_price * WEEKEND_DISCOUNT_RATE
        } else {
            Decimal::ZERO
        };
        prop_assert_eq!(b.weekend_discount, expected);
    }

    /// Final price is always positive and carries at most 2 decimals.
    #[test]
    fn prop_final_price_well_formed(sand in in_tier_weight(), when in timestamp()) {
        let b = quote(sand, when, PaymentMethod::Cash).unwrap();
        prop_assert!(b.final_price > dec!(0));
        prop_assert!(b.final_price.scale() <= 2);
    }
}
