//! Client management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::AppState;
use sabliere_db::repositories::client::{ClientError, ClientRepository, CreateClientInput};

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients", post(create_client))
        .route("/clients/{client_id}", get(get_client))
}

/// Request body for registering a client.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    /// Client name (required).
    pub name: String,
    /// Optional company.
    pub company: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional email; format-checked when present.
    pub email: Option<String>,
}

/// Response for a client.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    /// Client ID.
    pub id: Uuid,
    /// Client name.
    pub name: String,
    /// Company.
    pub company: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

impl From<sabliere_db::entities::clients::Model> for ClientResponse {
    fn from(model: sabliere_db::entities::clients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            company: model.company,
            phone: model.phone,
            email: model.email,
        }
    }
}

/// GET `/clients` - List all clients.
async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(clients) => {
            let items: Vec<ClientResponse> = clients.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(json!({ "clients": items }))).into_response()
        }
        Err(e) => client_error_response(&e),
    }
}

/// GET `/clients/{client_id}` - Fetch one client.
async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.find_by_id(client_id).await {
        Ok(Some(client)) => (StatusCode::OK, Json(ClientResponse::from(client))).into_response(),
        Ok(None) => client_error_response(&ClientError::NotFound(client_id)),
        Err(e) => client_error_response(&e),
    }
}

/// POST `/clients` - Register a client.
async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> impl IntoResponse {
    if let Some(email) = &payload.email
        && !email.validate_email()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_email",
                "message": format!("Invalid email address: {email}")
            })),
        )
            .into_response();
    }

    let repo = ClientRepository::new((*state.db).clone());

    match repo
        .create(CreateClientInput {
            name: payload.name,
            company: payload.company,
            phone: payload.phone,
            email: payload.email,
        })
        .await
    {
        Ok(client) => (StatusCode::CREATED, Json(ClientResponse::from(client))).into_response(),
        Err(e) => client_error_response(&e),
    }
}

fn client_error_response(error: &ClientError) -> axum::response::Response {
    match error {
        ClientError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "client_not_found",
                "message": error.to_string()
            })),
        )
            .into_response(),
        ClientError::EmptyName => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_client",
                "message": error.to_string()
            })),
        )
            .into_response(),
        ClientError::Database(e) => {
            error!(error = %e, "Client operation failed");
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
