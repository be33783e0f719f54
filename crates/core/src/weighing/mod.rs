//! Weighbridge transaction validation rules.
//!
//! This module implements the business rules that turn a truck's raw
//! weight readings into a validated sand weight:
//! - Weight bounds (empty, total, derived sand weight)
//! - Duration bounds between entry and exit
//! - Payment preconditions (bank reference for transfers)
//!
//! Rules are checked in a fixed order and the FIRST failing rule is
//! returned. Callers display that message verbatim to the yard
//! operator, so the order is part of the contract.

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::WeighingError;
pub use types::{PaymentIntent, WeighingCandidate};
pub use validation::{
    MAX_DURATION_MINUTES, MAX_SAND_WEIGHT, MAX_TOTAL_WEIGHT, MIN_EMPTY_WEIGHT, MIN_SAND_WEIGHT,
    duration_minutes, sand_weight, validate,
};
