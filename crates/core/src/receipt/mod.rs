//! Receipt integrity hashing and verification.
//!
//! A receipt carries a SHA-256 digest over the transaction's
//! finalized fields so that post-issuance tampering of a displayed or
//! printed receipt can be detected.
//!
//! This is tamper-EVIDENCE only: there is no secret key, so anyone
//! who can alter the fields can also recompute the digest. Do not
//! present it as authentication or a security credential.

pub mod hash;
pub mod types;

#[cfg(test)]
mod hash_props;

pub use hash::{ReceiptError, receipt_hash, verify_receipt};
pub use types::{ClientDetails, PaymentDetails, ReceiptData, TruckDetails};
