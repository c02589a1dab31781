//! Customer API handlers.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use saral_core::types::Customer;
use saral_db::{CustomerUpdate, NewCustomer};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list).post(create))
        .route(
            "/api/customers/{id}",
            get(get_by_id).put(update).delete(delete),
        )
}

/// GET /api/customers
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Customer>>> {
    Ok(Json(state.db.customers().list().await?))
}

/// GET /api/customers/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.db.customers().get_by_id(&id).await?))
}

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewCustomer>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.db.customers().insert(payload).await?))
}

/// PUT /api/customers/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CustomerUpdate>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.db.customers().update(&id, payload).await?))
}

/// DELETE /api/customers/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.db.customers().delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use saral_db::{Database, DbConfig};

    use crate::config::ServerConfig;
    use crate::state::AppState;

    async fn test_app() -> axum::Router {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = ServerConfig {
            port: 0,
            database_path: ":memory:".to_string(),
            cors_origin: None,
        };
        crate::api::router().with_state(AppState::new(db, config))
    }

    #[tokio::test]
    async fn test_create_get_delete_round_trip() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/customers")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "name": "Ramesh Traders",
                            "phone": "9876543210",
                            "state": "Same"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let id = created["id"].as_str().unwrap();
        assert_eq!(created["customer_type"], "B2C");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/customers/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/customers/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/customers/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
