//! Business rule validation for weighbridge transactions.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::WeighingError;
use super::types::WeighingCandidate;
use crate::lifecycle::PaymentMethod;

/// Minimum registered empty weight for a truck, in tons.
pub const MIN_EMPTY_WEIGHT: Decimal = dec!(2);
/// Maximum total weighed mass, in tons.
pub const MAX_TOTAL_WEIGHT: Decimal = dec!(40);
/// Minimum billable sand weight, in tons.
pub const MIN_SAND_WEIGHT: Decimal = dec!(0.5);
/// Maximum sand weight per load, in tons.
pub const MAX_SAND_WEIGHT: Decimal = dec!(30);
/// Maximum time a truck may spend on site, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Derives the sand weight: total weighed mass minus the truck's
/// registered empty weight. Exact subtraction, no rounding.
#[must_use]
pub fn sand_weight(total_weight: Decimal, empty_weight: Decimal) -> Decimal {
    total_weight - empty_weight
}

/// Duration between entry and exit, in whole minutes (truncated
/// toward zero). Callers must order the timestamps first: a negative
/// sub-minute duration truncates to 0 here.
#[must_use]
pub fn duration_minutes(entry_time: NaiveDateTime, exit_time: NaiveDateTime) -> i64 {
    (exit_time - entry_time).num_minutes()
}

/// Validates a candidate transaction against the weighbridge rules.
///
/// Rules are checked in a fixed order and the first violation is
/// returned; callers show its message verbatim. On success, returns
/// the derived sand weight.
///
/// Duration rules only apply when `exit_time` is present; the payment
/// rule only applies when a payment intent is attached.
///
/// # Errors
///
/// Returns the first failing [`WeighingError`], in rule order.
pub fn validate(candidate: &WeighingCandidate) -> Result<Decimal, WeighingError> {
    if candidate.empty_weight < MIN_EMPTY_WEIGHT {
        return Err(WeighingError::EmptyWeightTooLow);
    }

    if candidate.total_weight <= candidate.empty_weight {
        return Err(WeighingError::TotalWeightNotAboveEmpty);
    }

    if candidate.total_weight > MAX_TOTAL_WEIGHT {
        return Err(WeighingError::TotalWeightExceedsMaximum);
    }

    let sand = sand_weight(candidate.total_weight, candidate.empty_weight);
    if sand < MIN_SAND_WEIGHT {
        return Err(WeighingError::SandWeightBelowMinimum);
    }
    if sand > MAX_SAND_WEIGHT {
        return Err(WeighingError::SandWeightExceedsMaximum);
    }

    if let Some(exit_time) = candidate.exit_time {
        // Compare timestamps directly: a sub-minute negative duration
        // would truncate to 0 minutes and slip past a `< 0` check.
        if exit_time < candidate.entry_time {
            return Err(WeighingError::ExitBeforeEntry);
        }
        if duration_minutes(candidate.entry_time, exit_time) > MAX_DURATION_MINUTES {
            return Err(WeighingError::DurationExceedsMaximum);
        }
    }

    if let Some(payment) = &candidate.payment
        && payment.method == PaymentMethod::BankTransfer
        && payment
            .bank_reference
            .as_deref()
            .is_none_or(|reference| reference.trim().is_empty())
    {
        return Err(WeighingError::BankReferenceRequired);
    }

    Ok(sand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weighing::types::PaymentIntent;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn entry() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn candidate(empty: Decimal, total: Decimal) -> WeighingCandidate {
        WeighingCandidate {
            empty_weight: empty,
            total_weight: total,
            entry_time: entry(),
            exit_time: Some(entry() + chrono::Duration::hours(1)),
            payment: None,
        }
    }

    #[test]
    fn test_valid_candidate_returns_sand_weight() {
        let result = validate(&candidate(dec!(10), dec!(18)));
        assert_eq!(result, Ok(dec!(8)));
    }

    #[test]
    fn test_sand_weight_is_exact_subtraction() {
        assert_eq!(sand_weight(dec!(18.75), dec!(10.25)), dec!(8.5));
    }

    #[rstest]
    #[case(dec!(1.9), dec!(18), WeighingError::EmptyWeightTooLow)]
    #[case(dec!(10), dec!(10), WeighingError::TotalWeightNotAboveEmpty)]
    #[case(dec!(10), dec!(9), WeighingError::TotalWeightNotAboveEmpty)]
    #[case(dec!(10), dec!(40.5), WeighingError::TotalWeightExceedsMaximum)]
    #[case(dec!(10), dec!(10.25), WeighingError::SandWeightBelowMinimum)]
    #[case(dec!(2), dec!(33), WeighingError::SandWeightExceedsMaximum)]
    fn test_weight_rules(
        #[case] empty: Decimal,
        #[case] total: Decimal,
        #[case] expected: WeighingError,
    ) {
        assert_eq!(validate(&candidate(empty, total)), Err(expected));
    }

    #[test]
    fn test_empty_weight_checked_before_total_weight() {
        // Violates both rule 1 and rule 2; rule 1 must win.
        let result = validate(&candidate(dec!(1), dec!(0.5)));
        assert_eq!(result, Err(WeighingError::EmptyWeightTooLow));
    }

    #[test]
    fn test_total_weight_checked_before_sand_bounds() {
        // total > 40 also implies sand > 30 with a 2t truck.
        let result = validate(&candidate(dec!(2), dec!(45)));
        assert_eq!(result, Err(WeighingError::TotalWeightExceedsMaximum));
    }

    #[test]
    fn test_exit_before_entry_rejected() {
        let mut c = candidate(dec!(10), dec!(18));
        c.exit_time = Some(entry() - chrono::Duration::minutes(1));
        assert_eq!(validate(&c), Err(WeighingError::ExitBeforeEntry));
    }

    #[test]
    fn test_exit_seconds_before_entry_rejected() {
        // A reversal smaller than a minute truncates to 0 minutes;
        // the timestamp comparison must still reject it.
        let mut c = candidate(dec!(10), dec!(18));
        c.exit_time = Some(entry() - chrono::Duration::seconds(30));
        assert_eq!(validate(&c), Err(WeighingError::ExitBeforeEntry));
    }

    #[test]
    fn test_exit_equal_to_entry_allowed() {
        let mut c = candidate(dec!(10), dec!(18));
        c.exit_time = Some(entry());
        assert!(validate(&c).is_ok());
    }

    #[test]
    fn test_duration_of_exactly_24_hours_allowed() {
        let mut c = candidate(dec!(10), dec!(18));
        c.exit_time = Some(entry() + chrono::Duration::hours(24));
        assert!(validate(&c).is_ok());
    }

    #[test]
    fn test_duration_over_24_hours_rejected() {
        let mut c = candidate(dec!(10), dec!(18));
        c.exit_time = Some(entry() + chrono::Duration::minutes(MAX_DURATION_MINUTES + 1));
        assert_eq!(validate(&c), Err(WeighingError::DurationExceedsMaximum));
    }

    #[test]
    fn test_missing_exit_skips_duration_rules() {
        let mut c = candidate(dec!(10), dec!(18));
        c.exit_time = None;
        assert!(validate(&c).is_ok());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_string()))]
    fn test_bank_transfer_requires_reference(#[case] reference: Option<String>) {
        let mut c = candidate(dec!(10), dec!(18));
        c.payment = Some(PaymentIntent {
            method: PaymentMethod::BankTransfer,
            bank_reference: reference,
        });
        assert_eq!(validate(&c), Err(WeighingError::BankReferenceRequired));
    }

    #[test]
    fn test_cash_needs_no_reference() {
        let mut c = candidate(dec!(10), dec!(18));
        c.payment = Some(PaymentIntent {
            method: PaymentMethod::Cash,
            bank_reference: None,
        });
        assert!(validate(&c).is_ok());
    }

    #[test]
    fn test_bank_transfer_with_reference_passes() {
        let mut c = candidate(dec!(10), dec!(18));
        c.payment = Some(PaymentIntent {
            method: PaymentMethod::BankTransfer,
            bank_reference: Some("VIR-2024-00017".to_string()),
        });
        assert!(validate(&c).is_ok());
    }

    #[test]
    fn test_weight_rules_win_over_payment_rule() {
        // Violates rule 1 and rule 8 at once; rule 1 must be reported.
        let mut c = candidate(dec!(1), dec!(18));
        c.payment = Some(PaymentIntent {
            method: PaymentMethod::BankTransfer,
            bank_reference: None,
        });
        assert_eq!(validate(&c), Err(WeighingError::EmptyWeightTooLow));
    }
}
