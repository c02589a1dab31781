//! # API Modules
//!
//! One module per resource, each exposing a `router()`. Handlers stay
//! thin: extract, delegate to saral-db, map errors through `ApiError`.

pub mod audit;
pub mod checkout;
pub mod customers;
pub mod health;
pub mod invoices;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Assembles the full API surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(checkout::router())
        .merge(products::router())
        .merge(customers::router())
        .merge(invoices::router())
        .merge(audit::router())
        .merge(health::router())
}
