//! Candidate types presented to the weighbridge validator.
//!
//! The surrounding request layer resolves all references (truck,
//! client, payment intent) and hands the validator plain values; the
//! core never fetches anything itself.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::PaymentMethod;

/// Payment intent attached to a candidate transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// How the client intends to pay.
    pub method: PaymentMethod,
    /// Bank reference, required for bank transfers.
    pub bank_reference: Option<String>,
}

/// A candidate weighbridge transaction, ready for validation.
///
/// Timestamps are yard-local clock time. `exit_time` is absent while
/// the truck is still on site; duration rules only apply once both
/// timestamps are present. `payment` is absent until the operator
/// records a payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeighingCandidate {
    /// Truck empty weight in tons, fixed at registration.
    pub empty_weight: Decimal,
    /// Total weighed mass in tons (truck + load).
    pub total_weight: Decimal,
    /// Weigh-in timestamp.
    pub entry_time: NaiveDateTime,
    /// Weigh-out timestamp, if the truck has exited.
    pub exit_time: Option<NaiveDateTime>,
    /// Payment intent, if already known.
    pub payment: Option<PaymentIntent>,
}
