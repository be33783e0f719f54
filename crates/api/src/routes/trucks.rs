//! Truck management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use sabliere_db::repositories::truck::{
    CreateTruckInput, TruckError, TruckRepository, UpdateTruckInput,
};

/// Creates the truck routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trucks", get(list_trucks))
        .route("/trucks", post(create_truck))
        .route("/trucks/{truck_id}", get(get_truck))
        .route("/trucks/{truck_id}", put(update_truck))
        .route("/trucks/{truck_id}", delete(delete_truck))
}

/// Request body for registering a truck.
#[derive(Debug, Deserialize)]
pub struct CreateTruckRequest {
    /// License plate (unique).
    pub license_plate: String,
    /// Empty weight in tons, fixed at registration.
    pub empty_weight: Decimal,
    /// Owning driver.
    pub driver_id: Uuid,
}

/// Request body for updating a truck.
///
/// Empty weight is not updatable; it is load-bearing for past
/// transactions.
#[derive(Debug, Deserialize)]
pub struct UpdateTruckRequest {
    /// New license plate.
    pub license_plate: Option<String>,
    /// New owning driver.
    pub driver_id: Option<Uuid>,
}

/// Response for a truck.
#[derive(Debug, Serialize)]
pub struct TruckResponse {
    /// Truck ID.
    pub id: Uuid,
    /// License plate.
    pub license_plate: String,
    /// Empty weight in tons.
    pub empty_weight: Decimal,
    /// Owning driver ID.
    pub driver_id: Uuid,
    /// Owning driver name, when joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
}

impl From<sabliere_db::entities::trucks::Model> for TruckResponse {
    fn from(model: sabliere_db::entities::trucks::Model) -> Self {
        Self {
            id: model.id,
            license_plate: model.license_plate,
            empty_weight: model.empty_weight,
            driver_id: model.driver_id,
            driver_name: None,
        }
    }
}

/// GET `/trucks` - List all trucks with their drivers.
async fn list_trucks(State(state): State<AppState>) -> impl IntoResponse {
    let repo = TruckRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(trucks) => {
            let items: Vec<TruckResponse> = trucks
                .into_iter()
                .map(|(truck, driver)| {
                    let mut response = TruckResponse::from(truck);
                    response.driver_name = driver.map(|d| d.name);
                    response
                })
                .collect();
            (StatusCode::OK, Json(json!({ "trucks": items }))).into_response()
        }
        Err(e) => truck_error_response(&e),
    }
}

/// POST `/trucks` - Register a truck.
async fn create_truck(
    State(state): State<AppState>,
    Json(payload): Json<CreateTruckRequest>,
) -> impl IntoResponse {
    let repo = TruckRepository::new((*state.db).clone());

    match repo
        .create(CreateTruckInput {
            license_plate: payload.license_plate,
            empty_weight: payload.empty_weight,
            driver_id: payload.driver_id,
        })
        .await
    {
        Ok(truck) => (StatusCode::CREATED, Json(TruckResponse::from(truck))).into_response(),
        Err(e) => truck_error_response(&e),
    }
}

/// GET `/trucks/{truck_id}` - Fetch one truck.
async fn get_truck(
    State(state): State<AppState>,
    Path(truck_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TruckRepository::new((*state.db).clone());

    match repo.find_by_id(truck_id).await {
        Ok(Some(truck)) => (StatusCode::OK, Json(TruckResponse::from(truck))).into_response(),
        Ok(None) => truck_error_response(&TruckError::NotFound(truck_id)),
        Err(e) => truck_error_response(&e),
    }
}

/// PUT `/trucks/{truck_id}` - Update a truck's plate or owner.
async fn update_truck(
    State(state): State<AppState>,
    Path(truck_id): Path<Uuid>,
    Json(payload): Json<UpdateTruckRequest>,
) -> impl IntoResponse {
    let repo = TruckRepository::new((*state.db).clone());

    match repo
        .update(
            truck_id,
            UpdateTruckInput {
                license_plate: payload.license_plate,
                driver_id: payload.driver_id,
            },
        )
        .await
    {
        Ok(truck) => (StatusCode::OK, Json(TruckResponse::from(truck))).into_response(),
        Err(e) => truck_error_response(&e),
    }
}

/// DELETE `/trucks/{truck_id}` - Delete a truck.
async fn delete_truck(
    State(state): State<AppState>,
    Path(truck_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TruckRepository::new((*state.db).clone());

    match repo.delete(truck_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => truck_error_response(&e),
    }
}

fn truck_error_response(error: &TruckError) -> axum::response::Response {
    let (status, code) = match error {
        TruckError::NotFound(_) => (StatusCode::NOT_FOUND, "truck_not_found"),
        TruckError::DriverNotFound(_) => (StatusCode::NOT_FOUND, "driver_not_found"),
        TruckError::DuplicatePlate(_) => (StatusCode::CONFLICT, "duplicate_license_plate"),
        TruckError::EmptyPlate => (StatusCode::BAD_REQUEST, "invalid_license_plate"),
        TruckError::EmptyWeightTooLow => (StatusCode::BAD_REQUEST, "invalid_empty_weight"),
        TruckError::Database(e) => {
            error!(error = %e, "Truck operation failed");
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
