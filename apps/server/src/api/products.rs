//! Product API handlers.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use saral_core::types::Product;
use saral_db::{NewProduct, ProductUpdate};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        // Fixed path before /{id} to avoid capture
        .route("/api/products/low-stock", get(low_stock))
        .route(
            "/api/products/{id}",
            get(get_by_id).put(update).delete(delete),
        )
}

/// GET /api/products - all active products
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().list().await?))
}

/// GET /api/products/low-stock - products at or below their threshold
pub async fn low_stock(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().low_stock().await?))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.db.products().get_by_id(&id).await?))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.db.products().insert(payload).await?))
}

/// PUT /api/products/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.db.products().update(&id, payload).await?))
}

/// DELETE /api/products/:id - soft delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.db.products().soft_delete(&id).await?;
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
    async fn test_create_then_list() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/products")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "name": "LED Bulb 9W",
                            "hsn_code": "9405",
                            "quantity": 50,
                            "cost_price_paise": 6000,
                            "sale_price_paise": 10000,
                            "min_stock": 10
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let products: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(products.as_array().unwrap().len(), 1);
        assert_eq!(products[0]["name"], "LED Bulb 9W");
    }

    #[tokio::test]
    async fn test_missing_product_is_404() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/products/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_low_stock_route_is_not_captured_as_id() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/products/low-stock")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        // Empty database: empty list, not a 404 for id "low-stock"
        assert_eq!(response.status(), StatusCode::OK);
    }
}
