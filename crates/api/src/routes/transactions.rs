//! Weighbridge transaction routes.
//!
//! A transaction is created at weigh-in, patched with the weigh-out
//! reading, then completed by a payment. Validation errors from the
//! core are returned verbatim for the operator.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use sabliere_core::lifecycle::{PaymentMethod, TransactionStatus};
use sabliere_db::entities::transactions;
use sabliere_db::repositories::transaction::{
    CreateTransactionInput, RecordPaymentInput, TransactionError, TransactionRepository,
    WeighOutInput,
};
use sabliere_shared::types::PageRequest;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{transaction_id}", get(get_transaction))
        .route("/transactions/{transaction_id}", patch(record_weigh_out))
        .route("/transactions/{transaction_id}/payment", post(record_payment))
        .route("/transactions/{transaction_id}/cancel", post(cancel_transaction))
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by status (wire format, e.g. `IN_PROGRESS`).
    pub status: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Request body for creating a transaction at weigh-in.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Truck on the bridge.
    pub truck_id: Uuid,
    /// Client buying the load.
    pub client_id: Uuid,
    /// Weigh-in timestamp (yard-local).
    pub entry_time: NaiveDateTime,
}

/// Request body for recording the weigh-out.
#[derive(Debug, Deserialize)]
pub struct WeighOutRequest {
    /// Total weighed mass in tons.
    pub total_weight: Decimal,
    /// Weigh-out timestamp (yard-local).
    pub exit_time: NaiveDateTime,
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// Payment method.
    pub method: PaymentMethod,
    /// Bank reference, required for transfers.
    pub bank_reference: Option<String>,
    /// Cash handed over (cash only).
    pub received_amount: Option<Decimal>,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Truck ID.
    pub truck_id: Uuid,
    /// Client ID.
    pub client_id: Uuid,
    /// Weigh-in timestamp.
    pub entry_time: NaiveDateTime,
    /// Weigh-out timestamp.
    pub exit_time: Option<NaiveDateTime>,
    /// Total weighed mass in tons.
    pub total_weight: Option<Decimal>,
    /// Derived sand weight in tons.
    pub sand_weight: Option<Decimal>,
    /// Lifecycle status (wire format).
    pub status: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        let status: TransactionStatus = model.status.into();
        Self {
            id: model.id,
            truck_id: model.truck_id,
            client_id: model.client_id,
            entry_time: model.entry_time,
            exit_time: model.exit_time,
            total_weight: model.total_weight,
            sand_weight: model.sand_weight,
            status: status.as_str().to_string(),
        }
    }
}

fn parse_status(value: &str) -> Option<TransactionStatus> {
    match value {
        "PENDING" => Some(TransactionStatus::Pending),
        "IN_PROGRESS" => Some(TransactionStatus::InProgress),
        "COMPLETED" => Some(TransactionStatus::Completed),
        "CANCELLED" => Some(TransactionStatus::Cancelled),
        _ => None,
    }
}

/// GET `/transactions` - List transactions with optional status filter.
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let status = match query.status.as_deref() {
        Some(raw) => match parse_status(raw) {
            Some(status) => Some(status),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": format!("Unknown transaction status: {raw}")
                    })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let mut page = PageRequest::default();
    if let Some(p) = query.page {
        page.page = p;
    }
    if let Some(per_page) = query.per_page {
        page.per_page = per_page.min(100);
    }

    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list(status, page).await {
        Ok(response) => {
            let items: Vec<TransactionResponse> =
                response.data.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(json!({ "transactions": items, "meta": response.meta })),
            )
                .into_response()
        }
        Err(e) => transaction_error_response(&e),
    }
}

/// POST `/transactions` - Create a transaction at weigh-in.
async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo
        .create(CreateTransactionInput {
            truck_id: payload.truck_id,
            client_id: payload.client_id,
            entry_time: payload.entry_time,
        })
        .await
    {
        Ok(transaction) => (
            StatusCode::CREATED,
            Json(TransactionResponse::from(transaction)),
        )
            .into_response(),
        Err(e) => transaction_error_response(&e),
    }
}

/// GET `/transactions/{transaction_id}` - Fetch one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.find_by_id(transaction_id).await {
        Ok(Some(transaction)) => {
            (StatusCode::OK, Json(TransactionResponse::from(transaction))).into_response()
        }
        Ok(None) => transaction_error_response(&TransactionError::NotFound(transaction_id)),
        Err(e) => transaction_error_response(&e),
    }
}

/// PATCH `/transactions/{transaction_id}` - Record the weigh-out.
async fn record_weigh_out(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<WeighOutRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo
        .record_weigh_out(
            transaction_id,
            WeighOutInput {
                total_weight: payload.total_weight,
                exit_time: payload.exit_time,
            },
        )
        .await
    {
        Ok(transaction) => {
            (StatusCode::OK, Json(TransactionResponse::from(transaction))).into_response()
        }
        Err(e) => transaction_error_response(&e),
    }
}

/// POST `/transactions/{transaction_id}/payment` - Record the payment
/// and complete the transaction.
async fn record_payment(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<RecordPaymentRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo
        .record_payment(
            transaction_id,
            RecordPaymentInput {
                method: payload.method,
                bank_reference: payload.bank_reference,
                received_amount: payload.received_amount,
            },
        )
        .await
    {
        Ok((payment, breakdown)) => (
            StatusCode::CREATED,
            Json(json!({
                "payment": {
                    "id": payment.id,
                    "transaction_id": payment.transaction_id,
                    "amount": payment.amount,
                    "method": payload.method.as_str(),
                    "bank_reference": payment.bank_reference,
                    "received_amount": payment.received_amount,
                    "change_due": payment.change_due,
                },
                "breakdown": breakdown
            })),
        )
            .into_response(),
        Err(e) => transaction_error_response(&e),
    }
}

/// POST `/transactions/{transaction_id}/cancel` - Cancel before payment.
async fn cancel_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.cancel(transaction_id).await {
        Ok(transaction) => {
            (StatusCode::OK, Json(TransactionResponse::from(transaction))).into_response()
        }
        Err(e) => transaction_error_response(&e),
    }
}

/// Maps repository errors to HTTP responses.
///
/// Validation messages are passed through verbatim; pricing errors are
/// defects and return an opaque 500.
pub(crate) fn transaction_error_response(error: &TransactionError) -> axum::response::Response {
    let (status, code) = match error {
        TransactionError::NotFound(_) => (StatusCode::NOT_FOUND, "transaction_not_found"),
        TransactionError::TruckNotFound(_) => (StatusCode::NOT_FOUND, "truck_not_found"),
        TransactionError::ClientNotFound(_) => (StatusCode::NOT_FOUND, "client_not_found"),
        TransactionError::DriverNotFound(_) => (StatusCode::NOT_FOUND, "driver_not_found"),
        TransactionError::NoPayment(_) => (StatusCode::NOT_FOUND, "payment_not_found"),
        TransactionError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
        TransactionError::InsufficientCash { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_cash")
        }
        TransactionError::Lifecycle(_) => (StatusCode::CONFLICT, "invalid_status_transition"),
        TransactionError::NotWeighedOut => (StatusCode::CONFLICT, "not_weighed_out"),
        TransactionError::Pricing(e) => {
            // Internal-consistency failure: validated weight matched no
            // tier. Never show to an end user.
            error!(error = %e, "Pricing failed for a validated weight");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response();
        }
        TransactionError::Database(e) => {
            error!(error = %e, "Transaction operation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response();
        }
    };

    (
        status,
        Json(json!({
            "error": code,
            "message": error.to_string()
        })),
    )
        .into_response()
}
