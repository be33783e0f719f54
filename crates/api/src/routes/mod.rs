//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod clients;
pub mod drivers;
pub mod health;
pub mod receipts;
pub mod transactions;
pub mod trucks;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(drivers::routes())
        .merge(trucks::routes())
        .merge(clients::routes())
        .merge(transactions::routes())
        .merge(receipts::routes())
}
