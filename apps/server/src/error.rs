//! # API Error Types
//!
//! The single error type every handler returns, and its mapping onto
//! HTTP status codes and the `{"error": "..."}` JSON body the clients
//! expect.
//!
//! ## Status Mapping
//! ```text
//! CoreError (business rule said no)      → 400 Bad Request
//! DbError::NotFound                      → 404 Not Found
//! anything else from the database        → 500 Internal Server Error
//! ```
//!
//! The error strings for the 400s are part of the client contract
//! ("Cart is empty", "Insufficient stock for <name>", ...) and come
//! straight from the domain error Display impls.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use saral_core::CoreError;
use saral_db::{DbError, StoreError};

/// What the HTTP client sees when a request fails.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(core) => core.into(),
            StoreError::Db(db) => db.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_bad_requests() {
        let api: ApiError = CoreError::EmptyCart.into();
        assert!(matches!(api, ApiError::BadRequest(ref msg) if msg == "Cart is empty"));

        let api: ApiError = CoreError::InsufficientStock {
            name: "LED Bulb".to_string(),
            available: 1,
            requested: 2,
        }
        .into();
        assert!(
            matches!(api, ApiError::BadRequest(ref msg) if msg == "Insufficient stock for LED Bulb")
        );
    }

    #[test]
    fn test_db_not_found_maps_to_404() {
        let api: ApiError = DbError::not_found("Bill", "x").into();
        assert!(matches!(api, ApiError::NotFound(_)));

        let api: ApiError = DbError::Internal("boom".to_string()).into();
        assert!(matches!(api, ApiError::Internal(_)));
    }
}
