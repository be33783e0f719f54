//! Price computation for validated sand weights.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::PricingError;
use super::types::{PriceBreakdown, TierInfo, WeightTier};
use crate::lifecycle::PaymentMethod;

/// Tiered rate schedule by total tonnage, in DH per ton.
pub const WEIGHT_TIERS: [WeightTier; 3] = [
    WeightTier {
        min: dec!(0.5),
        max: dec!(5),
        price_per_ton: dec!(150),
    },
    WeightTier {
        min: dec!(5.1),
        max: dec!(15),
        price_per_ton: dec!(140),
    },
    WeightTier {
        min: dec!(15.1),
        max: dec!(30),
        price_per_ton: dec!(130),
    },
];

/// Peak windows as half-open local hour ranges `[start, end)`.
const PEAK_HOURS: [(u32, u32); 2] = [(8, 12), (14, 17)];

/// Surcharge applied per ton when entry falls in a peak window, in DH.
pub const PEAK_HOUR_SURCHARGE_PER_TON: Decimal = dec!(10);

/// Weekend discount rate, applied to the base price only.
pub const WEEKEND_DISCOUNT_RATE: Decimal = dec!(0.05);

fn find_tier(sand_weight: Decimal) -> Option<&'static WeightTier> {
    WEIGHT_TIERS.iter().find(|tier| tier.contains(sand_weight))
}

/// Base price: sand weight times the matched tier's per-ton rate.
///
/// # Errors
///
/// Returns [`PricingError::WeightOutsideTiers`] when the weight lands
/// in no tier. This should be unreachable for validated weights and
/// indicates a caller defect, not bad user input.
pub fn tiered_base_price(sand_weight: Decimal) -> Result<Decimal, PricingError> {
    find_tier(sand_weight)
        .map(|tier| sand_weight * tier.price_per_ton)
        .ok_or(PricingError::WeightOutsideTiers(sand_weight))
}

/// Whether a yard-local timestamp falls inside a peak window.
///
/// Windows are half-open: the end hour itself is off-peak.
#[must_use]
pub fn is_peak_hour(at: NaiveDateTime) -> bool {
    let hour = at.hour();
    PEAK_HOURS
        .iter()
        .any(|&(start, end)| hour >= start && hour < end)
}

/// Whether a yard-local timestamp falls on a Saturday or Sunday.
#[must_use]
pub fn is_weekend(at: NaiveDateTime) -> bool {
    matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Computes the full price breakdown for a validated sand weight.
///
/// `final = base + peak surcharge - weekend discount`, rounded half-up
/// to the cent. The discount is 5% of the base price only, never of
/// the surcharge. Pricing does not currently vary by payment method;
/// the parameter is part of the call contract so quotes stay stable if
/// method-specific fees appear.
///
/// # Errors
///
/// Returns [`PricingError::WeightOutsideTiers`] for weights that match
/// no tier (an internal-consistency failure, see [`PricingError`]).
pub fn quote(
    sand_weight: Decimal,
    entry_time: NaiveDateTime,
    _payment_method: PaymentMethod,
) -> Result<PriceBreakdown, PricingError> {
    let base_price = tiered_base_price(sand_weight)?;

    let peak_hour_surcharge = if is_peak_hour(entry_time) {
        sand_weight * PEAK_HOUR_SURCHARGE_PER_TON
    } else {
        Decimal::ZERO
    };

    let weekend_discount = if is_weekend(entry_time) {
        base_price * WEEKEND_DISCOUNT_RATE
    } else {
        Decimal::ZERO
    };

    let final_price = (base_price + peak_hour_surcharge - weekend_discount)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(PriceBreakdown {
        base_price,
        peak_hour_surcharge,
        weekend_discount,
        final_price,
    })
}

/// Looks up the tier a sand weight falls in, plus the next tier and
/// the tons remaining until its minimum (floored at 0).
///
/// # Errors
///
/// Returns [`PricingError::WeightOutsideTiers`] for weights that match
/// no tier.
pub fn tier_info(sand_weight: Decimal) -> Result<TierInfo, PricingError> {
    let index = WEIGHT_TIERS
        .iter()
        .position(|tier| tier.contains(sand_weight))
        .ok_or(PricingError::WeightOutsideTiers(sand_weight))?;

    let next_tier = WEIGHT_TIERS.get(index + 1).copied();
    let tons_till_next_tier = next_tier.map(|next| (next.min - sand_weight).max(Decimal::ZERO));

    Ok(TierInfo {
        current_tier: WEIGHT_TIERS[index],
        next_tier,
        tons_till_next_tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    /// Monday 2024-03-04, off-peak afternoon.
    fn weekday_off_peak() -> NaiveDateTime {
        at(2024, 3, 4, 13, 0)
    }

    #[rstest]
    #[case(dec!(0.5), dec!(150))]
    #[case(dec!(5.0), dec!(150))]
    #[case(dec!(5.1), dec!(140))]
    #[case(dec!(15.0), dec!(140))]
    #[case(dec!(15.1), dec!(130))]
    #[case(dec!(30.0), dec!(130))]
    fn test_tier_boundaries(#[case] sand: Decimal, #[case] rate: Decimal) {
        assert_eq!(tiered_base_price(sand), Ok(sand * rate));
    }

    #[rstest]
    #[case(dec!(0.4))]
    #[case(dec!(5.05))] // inside the literal 5.0/5.1 schedule gap
    #[case(dec!(15.05))]
    #[case(dec!(30.01))]
    fn test_out_of_tier_weights_fail_hard(#[case] sand: Decimal) {
        assert_eq!(
            tiered_base_price(sand),
            Err(PricingError::WeightOutsideTiers(sand))
        );
    }

    #[rstest]
    #[case(8, 0, true)] // peak window start is inclusive
    #[case(11, 59, true)]
    #[case(12, 0, false)] // end hour is exclusive
    #[case(13, 59, false)]
    #[case(14, 0, true)]
    #[case(16, 59, true)]
    #[case(17, 0, false)]
    #[case(7, 59, false)]
    fn test_peak_hour_windows(#[case] hour: u32, #[case] minute: u32, #[case] peak: bool) {
        assert_eq!(is_peak_hour(at(2024, 3, 4, hour, minute)), peak);
    }

    #[test]
    fn test_weekend_detection() {
        assert!(is_weekend(at(2024, 3, 2, 10, 0))); // Saturday
        assert!(is_weekend(at(2024, 3, 3, 10, 0))); // Sunday
        assert!(!is_weekend(at(2024, 3, 6, 10, 0))); // Wednesday
    }

    #[test]
    fn test_quote_tier2_peak_weekday() {
        // 8 t of sand, Monday 09:00: tier 2 at 140 DH/t, peak surcharge
        // 8 x 10, no weekend discount.
        let breakdown = quote(dec!(8), at(2024, 3, 4, 9, 0), PaymentMethod::Cash).unwrap();
        assert_eq!(breakdown.base_price, dec!(1120));
        assert_eq!(breakdown.peak_hour_surcharge, dec!(80));
        assert_eq!(breakdown.weekend_discount, dec!(0));
        assert_eq!(breakdown.final_price, dec!(1200.00));
    }

    #[test]
    fn test_quote_tier1_peak_sunday() {
        // 3 t, Sunday 10:00: base 450, surcharge 30, discount 22.50.
        let breakdown = quote(dec!(3), at(2024, 3, 3, 10, 0), PaymentMethod::BankTransfer).unwrap();
        assert_eq!(breakdown.base_price, dec!(450));
        assert_eq!(breakdown.peak_hour_surcharge, dec!(30));
        assert_eq!(breakdown.weekend_discount, dec!(22.50));
        assert_eq!(breakdown.final_price, dec!(457.50));
    }

    #[test]
    fn test_discount_excludes_surcharge() {
        // Saturday peak: discount must be 5% of base only.
        let breakdown = quote(dec!(10), at(2024, 3, 2, 9, 0), PaymentMethod::Cash).unwrap();
        assert_eq!(breakdown.weekend_discount, dec!(70)); // 1400 * 0.05
        assert_eq!(breakdown.final_price, dec!(1430.00));
    }

    #[test]
    fn test_final_price_rounds_half_up_on_the_cent() {
        // 6.25 t x 140 = 875 base; Saturday discount 43.75 -> 831.25
        // exact. Half-cent cases need an odd-cent discount: 6.27 t
        // gives base 877.80, discount 43.890, final 833.910 -> 833.91.
        let breakdown = quote(dec!(6.27), at(2024, 3, 2, 13, 0), PaymentMethod::Cash).unwrap();
        assert_eq!(breakdown.final_price, dec!(833.91));

        // And the midpoint itself rounds away from zero.
        let value = dec!(817.955).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(value, dec!(817.96));
    }

    #[test]
    fn test_quote_is_deterministic() {
        let when = weekday_off_peak();
        let a = quote(dec!(12.5), when, PaymentMethod::Cash).unwrap();
        let b = quote(dec!(12.5), when, PaymentMethod::Cash).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_quote_ignores_payment_method() {
        let when = weekday_off_peak();
        let cash = quote(dec!(12.5), when, PaymentMethod::Cash).unwrap();
        let transfer = quote(dec!(12.5), when, PaymentMethod::BankTransfer).unwrap();
        assert_eq!(cash, transfer);
    }

    #[test]
    fn test_tier_info_middle_tier() {
        let info = tier_info(dec!(8)).unwrap();
        assert_eq!(info.current_tier.price_per_ton, dec!(140));
        assert_eq!(info.next_tier.unwrap().price_per_ton, dec!(130));
        assert_eq!(info.tons_till_next_tier, Some(dec!(7.1)));
    }

    #[test]
    fn test_tier_info_top_tier_has_no_next() {
        let info = tier_info(dec!(20)).unwrap();
        assert_eq!(info.current_tier.price_per_ton, dec!(130));
        assert_eq!(info.next_tier, None);
        assert_eq!(info.tons_till_next_tier, None);
    }

    #[test]
    fn test_tier_info_remaining_tons_at_tier_max() {
        // Tier-2 max is 15.0 and tier 3 starts at 15.1.
        let info = tier_info(dec!(15)).unwrap();
        assert_eq!(info.tons_till_next_tier, Some(dec!(0.1)));
    }
}
