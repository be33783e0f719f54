//! Pricing error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Pricing failures.
///
/// Unlike weighbridge validation errors, these indicate an internal
/// inconsistency: a sand weight that passed validation should always
/// land in a tier. They must never be shown to an end user; surfacing
/// one means the validator was skipped or the tier table disagrees
/// with the validator bounds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Sand weight falls outside every pricing tier.
    #[error("Sand weight {0} tons falls outside all pricing tiers")]
    WeightOutsideTiers(Decimal),
}
