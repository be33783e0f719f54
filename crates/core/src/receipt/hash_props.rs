//! Property-based tests for receipt hash stability.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use sabliere_shared::types::TransactionId;
use uuid::Uuid;

use super::hash::{receipt_hash, verify_receipt};
use super::types::{ClientDetails, PaymentDetails, ReceiptData, TruckDetails};
use crate::lifecycle::{PaymentMethod, PaymentStatus};

fn weight() -> impl Strategy<Value = Decimal> {
    (50i64..3000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn method() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![Just(PaymentMethod::Cash), Just(PaymentMethod::BankTransfer)]
}

fn receipt_strategy() -> impl Strategy<Value = ReceiptData> {
    (
        any::<u128>(),
        weight(),
        weight(),
        "[A-Z0-9-]{5,12}",
        "[A-Za-z ]{3,24}",
        method(),
        proptest::option::of("[A-Z0-9]{8}"),
    )
        .prop_map(|(id, sand, total, plate, name, method, bank_reference)| {
            let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
            ReceiptData {
                id: TransactionId::from_uuid(Uuid::from_u128(id)),
                entry_time: day.and_hms_opt(8, 15, 0).unwrap(),
                exit_time: day.and_hms_opt(9, 5, 0).unwrap(),
                sand_weight: sand,
                total_weight: total,
                truck: TruckDetails {
                    license_plate: plate,
                    empty_weight: Decimal::new(1000, 2),
                    driver_name: name.clone(),
                },
                client: ClientDetails {
                    name,
                    company: None,
                },
                payment: PaymentDetails {
                    amount: sand * Decimal::new(140, 0),
                    method,
                    status: PaymentStatus::Completed,
                    bank_reference,
                },
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Hashing is deterministic and self-verifying.
    #[test]
    fn prop_hash_roundtrip(receipt in receipt_strategy()) {
        let hash = receipt_hash(&receipt).unwrap();
        prop_assert_eq!(hash.len(), 64);
        prop_assert_eq!(&hash, &receipt_hash(&receipt).unwrap());
        prop_assert!(verify_receipt(&receipt, &hash).unwrap());
    }

    /// Any single-character corruption of the digest fails verification.
    #[test]
    fn prop_corrupted_hash_rejected(receipt in receipt_strategy(), position in 0usize..64) {
        let hash = receipt_hash(&receipt).unwrap();
        let mut bytes = hash.clone().into_bytes();
        bytes[position] = if bytes[position] == b'f' { b'0' } else { b'f' };
        let corrupted = String::from_utf8(bytes).unwrap();
        prop_assert_ne!(&corrupted, &hash);
        prop_assert!(!verify_receipt(&receipt, &corrupted).unwrap());
    }

    /// A one-cent change to the amount changes the digest.
    #[test]
    fn prop_amount_tamper_detected(receipt in receipt_strategy()) {
        let hash = receipt_hash(&receipt).unwrap();
        let mut tampered = receipt.clone();
        tampered.payment.amount += Decimal::new(1, 2);
        prop_assert!(!verify_receipt(&tampered, &hash).unwrap());
    }
}
