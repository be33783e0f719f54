//! Driver management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use sabliere_db::repositories::driver::{CreateDriverInput, DriverError, DriverRepository};

/// Creates the driver routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers))
        .route("/drivers", post(create_driver))
        .route("/drivers/{driver_id}", get(get_driver))
        .route("/drivers/{driver_id}", delete(delete_driver))
}

/// Request body for registering a driver.
#[derive(Debug, Deserialize)]
pub struct CreateDriverRequest {
    /// Driver name.
    pub name: String,
    /// Optional phone number.
    pub phone: Option<String>,
}

/// Response for a driver.
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    /// Driver ID.
    pub id: Uuid,
    /// Driver name.
    pub name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<sabliere_db::entities::drivers::Model> for DriverResponse {
    fn from(model: sabliere_db::entities::drivers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// GET `/drivers` - List all drivers.
async fn list_drivers(State(state): State<AppState>) -> impl IntoResponse {
    let repo = DriverRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(drivers) => {
            let items: Vec<DriverResponse> = drivers.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(json!({ "drivers": items }))).into_response()
        }
        Err(e) => driver_error_response(&e),
    }
}

/// GET `/drivers/{driver_id}` - Fetch one driver.
async fn get_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = DriverRepository::new((*state.db).clone());

    match repo.find_by_id(driver_id).await {
        Ok(Some(driver)) => (StatusCode::OK, Json(DriverResponse::from(driver))).into_response(),
        Ok(None) => driver_error_response(&DriverError::NotFound(driver_id)),
        Err(e) => driver_error_response(&e),
    }
}

/// POST `/drivers` - Register a driver.
async fn create_driver(
    State(state): State<AppState>,
    Json(payload): Json<CreateDriverRequest>,
) -> impl IntoResponse {
    let repo = DriverRepository::new((*state.db).clone());

    match repo
        .create(CreateDriverInput {
            name: payload.name,
            phone: payload.phone,
        })
        .await
    {
        Ok(driver) => {
            (StatusCode::CREATED, Json(DriverResponse::from(driver))).into_response()
        }
        Err(e) => driver_error_response(&e),
    }
}

/// DELETE `/drivers/{driver_id}` - Delete a driver.
///
/// Rejected with 409 while the driver still owns trucks.
async fn delete_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = DriverRepository::new((*state.db).clone());

    match repo.delete(driver_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => driver_error_response(&e),
    }
}

fn driver_error_response(error: &DriverError) -> axum::response::Response {
    match error {
        DriverError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "driver_not_found",
                "message": error.to_string()
            })),
        )
            .into_response(),
        DriverError::HasTrucks { .. } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "driver_has_trucks",
                "message": error.to_string()
            })),
        )
            .into_response(),
        DriverError::EmptyName => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_driver",
                "message": error.to_string()
            })),
        )
            .into_response(),
        DriverError::Database(e) => {
            error!(error = %e, "Driver operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}
