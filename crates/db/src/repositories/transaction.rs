//! Transaction repository for weighbridge database operations.
//!
//! Runs the core business rules (validator, pricing engine, lifecycle
//! state machine) before any write. The repository owns the invariant
//! that `sand_weight` is always recomputed from
//! `total_weight - trucks.empty_weight` and never accepted from input.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    clients, drivers, payments, sea_orm_active_enums, transactions, trucks,
};
use sabliere_core::lifecycle::{PaymentMethod, TransactionStatus, TransitionError};
use sabliere_core::pricing::{self, PriceBreakdown, PricingError};
use sabliere_core::receipt::{ClientDetails, PaymentDetails, ReceiptData, TruckDetails};
use sabliere_core::weighing::{self, PaymentIntent, WeighingCandidate, WeighingError};
use sabliere_shared::types::{PageRequest, PageResponse, TransactionId};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Truck not found.
    #[error("Truck not found: {0}")]
    TruckNotFound(Uuid),

    /// Client not found.
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// Owning driver not found.
    #[error("Driver not found: {0}")]
    DriverNotFound(Uuid),

    /// A weighbridge business rule failed. Shown verbatim to the
    /// operator.
    #[error(transparent)]
    Validation(#[from] WeighingError),

    /// Illegal lifecycle transition.
    #[error(transparent)]
    Lifecycle(#[from] TransitionError),

    /// Pricing failed despite validation. A defect, never user input.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Payment attempted before the weigh-out was recorded.
    #[error("Transaction has no recorded weigh-out yet")]
    NotWeighedOut,

    /// Cash received is less than the amount owed.
    #[error("Received amount {received} DH is less than the amount owed {owed} DH")]
    InsufficientCash {
        /// Cash handed over.
        received: Decimal,
        /// Amount owed.
        owed: Decimal,
    },

    /// Receipt requested for a transaction without a payment.
    #[error("Transaction {0} has no payment; receipt unavailable")]
    NoPayment(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction at weigh-in.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Truck on the bridge.
    pub truck_id: Uuid,
    /// Client buying the load.
    pub client_id: Uuid,
    /// Weigh-in timestamp (yard-local).
    pub entry_time: NaiveDateTime,
}

/// Input for recording the weigh-out.
#[derive(Debug, Clone)]
pub struct WeighOutInput {
    /// Total weighed mass in tons.
    pub total_weight: Decimal,
    /// Weigh-out timestamp (yard-local).
    pub exit_time: NaiveDateTime,
}

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentInput {
    /// Payment method.
    pub method: PaymentMethod,
    /// Bank reference, required for transfers.
    pub bank_reference: Option<String>,
    /// Cash handed over (cash only); change is computed from it.
    pub received_amount: Option<Decimal>,
}

/// Fully joined view of a completed transaction, as needed to build
/// and stamp a receipt.
#[derive(Debug, Clone)]
pub struct ReceiptRecord {
    /// The transaction row.
    pub transaction: transactions::Model,
    /// The truck that hauled the load.
    pub truck: trucks::Model,
    /// The truck's owning driver.
    pub driver: drivers::Model,
    /// The client billed.
    pub client: clients::Model,
    /// The payment taken.
    pub payment: payments::Model,
}

impl ReceiptRecord {
    /// Builds the core receipt view for hashing and display.
    ///
    /// `find_receipt` only returns records with a weigh-out and a
    /// payment, so the optional columns are present here.
    #[must_use]
    pub fn to_receipt_data(&self) -> ReceiptData {
        ReceiptData {
            id: TransactionId::from_uuid(self.transaction.id),
            entry_time: self.transaction.entry_time,
            exit_time: self.transaction.exit_time.unwrap_or(self.transaction.entry_time),
            sand_weight: self.transaction.sand_weight.unwrap_or_default(),
            total_weight: self.transaction.total_weight.unwrap_or_default(),
            truck: TruckDetails {
                license_plate: self.truck.license_plate.clone(),
                empty_weight: self.truck.empty_weight,
                driver_name: self.driver.name.clone(),
            },
            client: ClientDetails {
                name: self.client.name.clone(),
                company: self.client.company.clone(),
            },
            payment: PaymentDetails {
                amount: self.payment.amount,
                method: self.payment.method.into(),
                status: self.payment.status.into(),
                bank_reference: self.payment.bank_reference.clone(),
            },
        }
    }
}

/// Transaction repository for weighbridge operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a transaction at weigh-in, in `PENDING` status.
    ///
    /// # Errors
    ///
    /// Returns an error if the truck or client does not exist.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        if trucks::Entity::find_by_id(input.truck_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(TransactionError::TruckNotFound(input.truck_id));
        }
        if clients::Entity::find_by_id(input.client_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(TransactionError::ClientNotFound(input.client_id));
        }

        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            truck_id: Set(input.truck_id),
            client_id: Set(input.client_id),
            entry_time: Set(input.entry_time),
            exit_time: Set(None),
            total_weight: Set(None),
            sand_weight: Set(None),
            status: Set(sea_orm_active_enums::TransactionStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(transaction.insert(&self.db).await?)
    }

    /// Records the weigh-out: total weight and exit time.
    ///
    /// Runs the weighbridge validator, derives the sand weight, and
    /// moves the transaction to `IN_PROGRESS`.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error with the first failing rule, or a
    /// `Lifecycle` error if the transaction is not `PENDING`.
    pub async fn record_weigh_out(
        &self,
        id: Uuid,
        input: WeighOutInput,
    ) -> Result<transactions::Model, TransactionError> {
        let (transaction, truck) = self.load_with_truck(id).await?;

        let status: TransactionStatus = transaction.status.into();
        let next = status.transition_to(TransactionStatus::InProgress)?;

        let candidate = WeighingCandidate {
            empty_weight: truck.empty_weight,
            total_weight: input.total_weight,
            entry_time: transaction.entry_time,
            exit_time: Some(input.exit_time),
            payment: None,
        };
        let sand_weight = weighing::validate(&candidate)?;

        let mut active: transactions::ActiveModel = transaction.into();
        active.total_weight = Set(Some(input.total_weight));
        active.exit_time = Set(Some(input.exit_time));
        active.sand_weight = Set(Some(sand_weight));
        active.status = Set(next.into());
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Records the payment and completes the transaction.
    ///
    /// Re-validates the full candidate (including the payment intent),
    /// prices the load, and inserts the payment atomically with the
    /// status change.
    ///
    /// # Errors
    ///
    /// Returns `NotWeighedOut` before the weigh-out, `Validation` /
    /// `Lifecycle` / `Pricing` errors per the core rules, and
    /// `InsufficientCash` when the cash received does not cover the
    /// amount owed.
    pub async fn record_payment(
        &self,
        id: Uuid,
        input: RecordPaymentInput,
    ) -> Result<(payments::Model, PriceBreakdown), TransactionError> {
        let (transaction, truck) = self.load_with_truck(id).await?;

        let status: TransactionStatus = transaction.status.into();
        let next = status.transition_to(TransactionStatus::Completed)?;

        let (Some(total_weight), Some(exit_time)) =
            (transaction.total_weight, transaction.exit_time)
        else {
            return Err(TransactionError::NotWeighedOut);
        };

        let candidate = WeighingCandidate {
            empty_weight: truck.empty_weight,
            total_weight,
            entry_time: transaction.entry_time,
            exit_time: Some(exit_time),
            payment: Some(PaymentIntent {
                method: input.method,
                bank_reference: input.bank_reference.clone(),
            }),
        };
        let sand_weight = weighing::validate(&candidate)?;

        let breakdown = pricing::quote(sand_weight, transaction.entry_time, input.method)?;
        let owed = breakdown.final_price;

        let (received_amount, change_due) = match (input.method, input.received_amount) {
            (PaymentMethod::Cash, Some(received)) => {
                if received < owed {
                    return Err(TransactionError::InsufficientCash { received, owed });
                }
                (Some(received), Some(received - owed))
            }
            _ => (None, None),
        };

        let txn = self.db.begin().await?;

        let now = chrono::Utc::now().into();
        let payment = payments::ActiveModel {
            id: Set(Uuid::now_v7()),
            transaction_id: Set(transaction.id),
            amount: Set(owed),
            method: Set(input.method.into()),
            status: Set(sea_orm_active_enums::PaymentStatus::Completed),
            bank_reference: Set(input.bank_reference),
            received_amount: Set(received_amount),
            change_due: Set(change_due),
            created_at: Set(now),
        };
        let payment = payment.insert(&txn).await?;

        let mut active: transactions::ActiveModel = transaction.into();
        active.status = Set(next.into());
        active.updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            transaction_id = %id,
            amount = %owed,
            method = %PaymentMethod::from(payment.method).as_str(),
            "Payment recorded"
        );

        Ok((payment, breakdown))
    }

    /// Cancels a transaction that has not been paid yet.
    ///
    /// # Errors
    ///
    /// Returns a `Lifecycle` error when the transaction is already in
    /// a terminal state.
    pub async fn cancel(&self, id: Uuid) -> Result<transactions::Model, TransactionError> {
        let transaction = self.find_by_id(id).await?.ok_or(TransactionError::NotFound(id))?;

        let status: TransactionStatus = transaction.status.into();
        let next = status.transition_to(TransactionStatus::Cancelled)?;

        let mut active: transactions::ActiveModel = transaction.into();
        active.status = Set(next.into());
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Finds a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<transactions::Model>, TransactionError> {
        Ok(transactions::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists transactions, newest entry first, optionally filtered by
    /// status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        status: Option<TransactionStatus>,
        page: PageRequest,
    ) -> Result<PageResponse<transactions::Model>, TransactionError> {
        let mut query = transactions::Entity::find();
        if let Some(status) = status {
            let db_status: sea_orm_active_enums::TransactionStatus = status.into();
            query = query.filter(transactions::Column::Status.eq(db_status));
        }

        let query = query.order_by_desc(transactions::Column::EntryTime);

        let total = query.clone().count(&self.db).await?;
        let data = query
            .paginate(&self.db, page.limit())
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Loads the fully joined record needed to render and stamp a
    /// receipt.
    ///
    /// # Errors
    ///
    /// Returns `NoPayment` when the transaction has not been paid.
    pub async fn find_receipt(&self, id: Uuid) -> Result<ReceiptRecord, TransactionError> {
        let transaction = self.find_by_id(id).await?.ok_or(TransactionError::NotFound(id))?;

        let truck = trucks::Entity::find_by_id(transaction.truck_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::TruckNotFound(transaction.truck_id))?;

        let driver = drivers::Entity::find_by_id(truck.driver_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::DriverNotFound(truck.driver_id))?;

        let client = clients::Entity::find_by_id(transaction.client_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::ClientNotFound(transaction.client_id))?;

        let payment = payments::Entity::find()
            .filter(payments::Column::TransactionId.eq(transaction.id))
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NoPayment(id))?;

        Ok(ReceiptRecord {
            transaction,
            truck,
            driver,
            client,
            payment,
        })
    }

    async fn load_with_truck(
        &self,
        id: Uuid,
    ) -> Result<(transactions::Model, trucks::Model), TransactionError> {
        let transaction = self.find_by_id(id).await?.ok_or(TransactionError::NotFound(id))?;
        let truck = trucks::Entity::find_by_id(transaction.truck_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::TruckNotFound(transaction.truck_id))?;
        Ok((transaction, truck))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record() -> ReceiptRecord {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let created: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let transaction_id = Uuid::from_u128(0x01);
        ReceiptRecord {
            transaction: transactions::Model {
                id: transaction_id,
                truck_id: Uuid::from_u128(0x02),
                client_id: Uuid::from_u128(0x03),
                entry_time: day.and_hms_opt(9, 0, 0).unwrap(),
                exit_time: Some(day.and_hms_opt(9, 45, 0).unwrap()),
                total_weight: Some(dec!(18)),
                sand_weight: Some(dec!(8)),
                status: sea_orm_active_enums::TransactionStatus::Completed,
                created_at: created,
                updated_at: created,
            },
            truck: trucks::Model {
                id: Uuid::from_u128(0x02),
                license_plate: "12345-A-6".to_string(),
                empty_weight: dec!(10),
                driver_id: Uuid::from_u128(0x04),
                created_at: created,
                updated_at: created,
            },
            driver: drivers::Model {
                id: Uuid::from_u128(0x04),
                name: "Hassan Alami".to_string(),
                phone: None,
                created_at: created,
                updated_at: created,
            },
            client: clients::Model {
                id: Uuid::from_u128(0x03),
                name: "Omar Benjelloun".to_string(),
                company: Some("Atlas BTP".to_string()),
                phone: None,
                email: None,
                created_at: created,
                updated_at: created,
            },
            payment: payments::Model {
                id: Uuid::from_u128(0x05),
                transaction_id,
                amount: dec!(1200.00),
                method: sea_orm_active_enums::PaymentMethod::Cash,
                status: sea_orm_active_enums::PaymentStatus::Completed,
                bank_reference: None,
                received_amount: Some(dec!(1500)),
                change_due: Some(dec!(300)),
                created_at: created,
            },
        }
    }

    #[test]
    fn test_to_receipt_data_carries_joined_fields() {
        let data = record().to_receipt_data();
        assert_eq!(data.id.into_inner(), Uuid::from_u128(0x01));
        assert_eq!(data.sand_weight, dec!(8));
        assert_eq!(data.total_weight, dec!(18));
        assert_eq!(data.truck.license_plate, "12345-A-6");
        assert_eq!(data.truck.driver_name, "Hassan Alami");
        assert_eq!(data.client.company.as_deref(), Some("Atlas BTP"));
        assert_eq!(data.payment.amount, dec!(1200.00));
        assert_eq!(data.payment.method, PaymentMethod::Cash);
    }

    #[test]
    fn test_receipt_data_hash_is_stable_across_builds() {
        let a = record().to_receipt_data();
        let b = record().to_receipt_data();
        assert_eq!(
            sabliere_core::receipt::receipt_hash(&a).unwrap(),
            sabliere_core::receipt::receipt_hash(&b).unwrap()
        );
    }
}
