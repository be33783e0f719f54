//! Database enum mappings.
//!
//! These mirror the domain enums in `sabliere-core::lifecycle`; the
//! `From` impls keep the two in lockstep so repositories convert at
//! the boundary instead of matching on strings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use sabliere_core::lifecycle;

/// Transaction lifecycle status (`transaction_status` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
pub enum TransactionStatus {
    /// Created at weigh-in, no exit weight yet.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Exit weight recorded, awaiting payment.
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    /// Payment recorded.
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Cancelled before payment.
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// Payment method (`payment_method` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
pub enum PaymentMethod {
    /// Cash at the yard office.
    #[sea_orm(string_value = "CASH")]
    Cash,
    /// Bank transfer.
    #[sea_orm(string_value = "BANK_TRANSFER")]
    BankTransfer,
}

/// Payment settlement status (`payment_status` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
pub enum PaymentStatus {
    /// Recorded but not settled.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Settled.
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Failed or reversed.
    #[sea_orm(string_value = "FAILED")]
    Failed,
}

impl From<lifecycle::TransactionStatus> for TransactionStatus {
    fn from(status: lifecycle::TransactionStatus) -> Self {
        match status {
            lifecycle::TransactionStatus::Pending => Self::Pending,
            lifecycle::TransactionStatus::InProgress => Self::InProgress,
            lifecycle::TransactionStatus::Completed => Self::Completed,
            lifecycle::TransactionStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<TransactionStatus> for lifecycle::TransactionStatus {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::InProgress => Self::InProgress,
            TransactionStatus::Completed => Self::Completed,
            TransactionStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<lifecycle::PaymentMethod> for PaymentMethod {
    fn from(method: lifecycle::PaymentMethod) -> Self {
        match method {
            lifecycle::PaymentMethod::Cash => Self::Cash,
            lifecycle::PaymentMethod::BankTransfer => Self::BankTransfer,
        }
    }
}

impl From<PaymentMethod> for lifecycle::PaymentMethod {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Cash => Self::Cash,
            PaymentMethod::BankTransfer => Self::BankTransfer,
        }
    }
}

impl From<lifecycle::PaymentStatus> for PaymentStatus {
    fn from(status: lifecycle::PaymentStatus) -> Self {
        match status {
            lifecycle::PaymentStatus::Pending => Self::Pending,
            lifecycle::PaymentStatus::Completed => Self::Completed,
            lifecycle::PaymentStatus::Failed => Self::Failed,
        }
    }
}

impl From<PaymentStatus> for lifecycle::PaymentStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Pending => Self::Pending,
            PaymentStatus::Completed => Self::Completed,
            PaymentStatus::Failed => Self::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(lifecycle::TransactionStatus::Pending)]
    #[case(lifecycle::TransactionStatus::InProgress)]
    #[case(lifecycle::TransactionStatus::Completed)]
    #[case(lifecycle::TransactionStatus::Cancelled)]
    fn test_transaction_status_roundtrips(#[case] status: lifecycle::TransactionStatus) {
        let db_status: TransactionStatus = status.into();
        let back: lifecycle::TransactionStatus = db_status.into();
        assert_eq!(status, back);
    }

    #[rstest]
    #[case(lifecycle::PaymentMethod::Cash)]
    #[case(lifecycle::PaymentMethod::BankTransfer)]
    fn test_payment_method_roundtrips(#[case] method: lifecycle::PaymentMethod) {
        let db_method: PaymentMethod = method.into();
        let back: lifecycle::PaymentMethod = db_method.into();
        assert_eq!(method, back);
    }

    #[rstest]
    #[case(lifecycle::PaymentStatus::Pending)]
    #[case(lifecycle::PaymentStatus::Completed)]
    #[case(lifecycle::PaymentStatus::Failed)]
    fn test_payment_status_roundtrips(#[case] status: lifecycle::PaymentStatus) {
        let db_status: PaymentStatus = status.into();
        let back: lifecycle::PaymentStatus = db_status.into();
        assert_eq!(status, back);
    }
}
