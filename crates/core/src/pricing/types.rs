//! Pricing domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous sand-weight band with its own flat per-ton rate.
///
/// Bounds are inclusive on both ends. The tier table carries the
/// source schedule's literal boundaries (tier 2 starts at 5.1, tier 3
/// at 15.1), so weights inside the 0.1 t gaps price as out-of-tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTier {
    /// Minimum sand weight for this tier, in tons (inclusive).
    pub min: Decimal,
    /// Maximum sand weight for this tier, in tons (inclusive).
    pub max: Decimal,
    /// Flat rate in DH per ton.
    pub price_per_ton: Decimal,
}

impl WeightTier {
    /// Whether a sand weight falls inside this tier.
    #[must_use]
    pub fn contains(&self, sand_weight: Decimal) -> bool {
        sand_weight >= self.min && sand_weight <= self.max
    }
}

/// Price breakdown for one load of sand, all amounts in DH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Sand weight times the matched tier's per-ton rate.
    pub base_price: Decimal,
    /// Surcharge for entering during a peak window (0 otherwise).
    pub peak_hour_surcharge: Decimal,
    /// Weekend discount, 5% of the base price (0 on weekdays).
    pub weekend_discount: Decimal,
    /// `base + surcharge - discount`, rounded half-up to the cent.
    pub final_price: Decimal,
}

/// Tier position for operator display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierInfo {
    /// Tier the sand weight currently falls in.
    pub current_tier: WeightTier,
    /// The next (cheaper per ton) tier, if not already in the top one.
    pub next_tier: Option<WeightTier>,
    /// Tons remaining until the next tier's minimum (floored at 0).
    pub tons_till_next_tier: Option<Decimal>,
}
