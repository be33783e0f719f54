//! Receipt digest computation.
//!
//! The digest is SHA-256 over a canonical JSON serialization with a
//! fixed field order (struct declaration order below). Decimals are
//! normalized before hashing so scale differences (`8` vs `8.00`)
//! cannot change the digest of an equal value.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sabliere_shared::types::TransactionId;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::types::ReceiptData;
use crate::lifecycle::{PaymentMethod, PaymentStatus};

/// Receipt hashing errors.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Canonical serialization failed.
    #[error("Failed to serialize receipt for hashing: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Canonical hashing view. Field order here IS the hash contract;
// reordering fields changes every digest.
#[derive(Serialize)]
struct Canonical<'a> {
    id: TransactionId,
    entry_time: NaiveDateTime,
    exit_time: NaiveDateTime,
    sand_weight: Decimal,
    total_weight: Decimal,
    truck: CanonicalTruck<'a>,
    client: CanonicalClient<'a>,
    payment: CanonicalPayment<'a>,
}

#[derive(Serialize)]
struct CanonicalTruck<'a> {
    license_plate: &'a str,
    empty_weight: Decimal,
    driver_name: &'a str,
}

#[derive(Serialize)]
struct CanonicalClient<'a> {
    name: &'a str,
    company: Option<&'a str>,
}

#[derive(Serialize)]
struct CanonicalPayment<'a> {
    amount: Decimal,
    method: PaymentMethod,
    status: PaymentStatus,
    bank_reference: Option<&'a str>,
}

impl<'a> From<&'a ReceiptData> for Canonical<'a> {
    fn from(receipt: &'a ReceiptData) -> Self {
        Self {
            id: receipt.id,
            entry_time: receipt.entry_time,
            exit_time: receipt.exit_time,
            sand_weight: receipt.sand_weight.normalize(),
            total_weight: receipt.total_weight.normalize(),
            truck: CanonicalTruck {
                license_plate: &receipt.truck.license_plate,
                empty_weight: receipt.truck.empty_weight.normalize(),
                driver_name: &receipt.truck.driver_name,
            },
            client: CanonicalClient {
                name: &receipt.client.name,
                company: receipt.client.company.as_deref(),
            },
            payment: CanonicalPayment {
                amount: receipt.payment.amount.normalize(),
                method: receipt.payment.method,
                status: receipt.payment.status,
                bank_reference: receipt.payment.bank_reference.as_deref(),
            },
        }
    }
}

/// Computes the receipt integrity digest: 64 lowercase hex characters.
///
/// Deterministic over exactly the fields of [`ReceiptData`]; changing
/// any one field value changes the digest with overwhelming
/// probability.
///
/// # Errors
///
/// Returns [`ReceiptError::Serialization`] if canonical serialization
/// fails (not expected for well-formed data).
pub fn receipt_hash(receipt: &ReceiptData) -> Result<String, ReceiptError> {
    let canonical = serde_json::to_string(&Canonical::from(receipt))?;
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(hex::encode(digest))
}

/// Recomputes the digest and compares it against a stored one.
///
/// Returns `true` only on exact (case-sensitive) match.
///
/// # Errors
///
/// Returns [`ReceiptError::Serialization`] if the recomputation fails.
pub fn verify_receipt(receipt: &ReceiptData, stored_hash: &str) -> Result<bool, ReceiptError> {
    Ok(receipt_hash(receipt)? == stored_hash)
}
