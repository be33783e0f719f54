//! Tiered sand pricing with peak-hour and weekend adjustments.
//!
//! - Tiered base price by total tonnage
//! - Peak-hour surcharge per ton
//! - Weekend discount on the base price
//! - Tier lookup for operator display
//!
//! All functions are pure and deterministic given their inputs; the
//! entry timestamp is always passed in, never read from the clock.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::{
    PEAK_HOUR_SURCHARGE_PER_TON, WEEKEND_DISCOUNT_RATE, WEIGHT_TIERS, is_peak_hour, is_weekend,
    quote, tier_info, tiered_base_price,
};
pub use error::PricingError;
pub use types::{PriceBreakdown, TierInfo, WeightTier};
