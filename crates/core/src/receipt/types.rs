//! Receipt data types.
//!
//! A `ReceiptData` is the joined, finalized view of a transaction as
//! it appears on a printed receipt. The request layer resolves all
//! references; the stamper only reads plain values.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sabliere_shared::types::TransactionId;
use serde::{Deserialize, Serialize};

use crate::lifecycle::{PaymentMethod, PaymentStatus};

/// Truck fields that appear on a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckDetails {
    /// License plate.
    pub license_plate: String,
    /// Registered empty weight in tons.
    pub empty_weight: Decimal,
    /// Name of the owning driver.
    pub driver_name: String,
}

/// Client fields that appear on a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDetails {
    /// Client name.
    pub name: String,
    /// Optional company name.
    pub company: Option<String>,
}

/// Payment fields that appear on a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Amount paid, in DH.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Settlement status.
    pub status: PaymentStatus,
    /// Bank reference for transfers.
    ///
    /// An absent reference hashes as JSON `null` and therefore
    /// produces a different digest than an empty string.
    pub bank_reference: Option<String>,
}

/// The finalized transaction view a receipt is stamped over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptData {
    /// Transaction identifier.
    pub id: TransactionId,
    /// Weigh-in timestamp (yard-local).
    pub entry_time: NaiveDateTime,
    /// Weigh-out timestamp (yard-local).
    pub exit_time: NaiveDateTime,
    /// Derived sand weight in tons.
    pub sand_weight: Decimal,
    /// Total weighed mass in tons.
    pub total_weight: Decimal,
    /// Truck details.
    pub truck: TruckDetails,
    /// Client details.
    pub client: ClientDetails,
    /// Payment details.
    pub payment: PaymentDetails,
}
