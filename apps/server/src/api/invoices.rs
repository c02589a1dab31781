//! Invoice API handlers. Read-only: bills are created by checkout and
//! never change.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use saral_core::types::Bill;
use saral_db::BillWithItems;

use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 100;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/invoices", get(list))
        .route("/api/invoices/{id}", get(get_by_id))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// GET /api/invoices?limit=N - most recent bills first
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Bill>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 1000);
    Ok(Json(state.db.bills().list_recent(limit).await?))
}

/// GET /api/invoices/:id - by UUID or printed bill number, with items
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BillWithItems>> {
    Ok(Json(state.db.bills().get_with_items(&id).await?))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use saral_db::{Database, DbConfig};

    use crate::config::ServerConfig;
    use crate::state::AppState;

    async fn test_app() -> (axum::Router, Database) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = ServerConfig {
            port: 0,
            database_path: ":memory:".to_string(),
            cors_origin: None,
        };
        let state = AppState::new(db.clone(), config);
        (crate::api::router().with_state(state), db)
    }

    #[tokio::test]
    async fn test_checkout_then_fetch_invoice_by_number() {
        let (app, db) = test_app().await;
        sqlx::query(
            r#"
            INSERT INTO products (id, name, hsn_code, quantity, cost_price_paise,
                                  sale_price_paise, min_stock, is_active,
                                  created_at, updated_at)
            VALUES ('p1', 'LED Bulb', '9405', 10, 6000, 10000, 0, 1, ?1, ?1)
            "#,
        )
        .bind(chrono::Utc::now())
        .execute(db.pool())
        .await
        .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/checkout")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "cart": [{"product_id": "p1", "quantity": 2}]
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let receipt: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let bill_number = receipt["bill_number"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/invoices/{bill_number}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let invoice: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(invoice["bill_number"], bill_number);
        assert_eq!(invoice["items"].as_array().unwrap().len(), 1);
        assert_eq!(invoice["items"][0]["name_snapshot"], "LED Bulb");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/invoices")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let invoices: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(invoices.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_invoice_is_404() {
        let (app, _db) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/invoices/INV-1999-0001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
