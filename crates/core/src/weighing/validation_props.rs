//! Property-based tests for weighbridge validation rules.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::WeighingError;
use super::types::{PaymentIntent, WeighingCandidate};
use super::validation::validate;
use crate::lifecycle::PaymentMethod;

fn entry() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Weights with two decimal places, in tons.
fn weight(lo: i64, hi: i64) -> impl Strategy<Value = Decimal> {
    (lo * 100..hi * 100).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn candidate(empty: Decimal, total: Decimal) -> WeighingCandidate {
    WeighingCandidate {
        empty_weight: empty,
        total_weight: total,
        entry_time: entry(),
        exit_time: Some(entry() + Duration::hours(2)),
        payment: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any empty weight below 2 tons is rejected with the empty-weight
    /// message, regardless of the other fields.
    #[test]
    fn prop_low_empty_weight_always_first(
        empty in weight(0, 2),
        total in weight(0, 45),
        bank_transfer in any::<bool>(),
    ) {
        let mut c = candidate(empty, total);
        if bank_transfer {
            c.payment = Some(PaymentIntent {
                method: PaymentMethod::BankTransfer,
                bank_reference: None,
            });
        }
        prop_assert_eq!(validate(&c), Err(WeighingError::EmptyWeightTooLow));
    }

    /// Any total weight at or below the empty weight is rejected with
    /// the total-weight message (checked before sand-weight bounds).
    #[test]
    fn prop_total_not_above_empty_rejected(
        empty in weight(2, 40),
        deficit in weight(0, 5),
    ) {
        let c = candidate(empty, empty - deficit);
        prop_assert_eq!(validate(&c), Err(WeighingError::TotalWeightNotAboveEmpty));
    }

    /// For accepted candidates the returned sand weight is exactly
    /// total - empty.
    #[test]
    fn prop_sand_weight_is_exact(
        empty in weight(2, 10),
        sand in weight(1, 30),
    ) {
        let c = candidate(empty, empty + sand);
        if c.total_weight <= dec!(40) && sand <= dec!(30) && sand >= dec!(0.5) {
            prop_assert_eq!(validate(&c), Ok(sand));
        }
    }

    /// Any exit before entry is rejected, even by less than a minute.
    #[test]
    fn prop_exit_before_entry_rejected(offset_seconds in 1i64..90_000) {
        let mut c = candidate(dec!(10), dec!(18));
        c.exit_time = Some(entry() - Duration::seconds(offset_seconds));
        prop_assert_eq!(validate(&c), Err(WeighingError::ExitBeforeEntry));
    }

    /// Validation never panics, whatever the inputs.
    #[test]
    fn prop_validation_total(
        empty in weight(-5, 50),
        total in weight(-5, 60),
        exit_offset_seconds in -180_000i64..180_000,
    ) {
        let mut c = candidate(empty, total);
        c.exit_time = Some(entry() + Duration::seconds(exit_offset_seconds));
        let _ = validate(&c);
    }
}
