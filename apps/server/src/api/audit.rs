//! Audit log API handlers. Read-only trail of user actions.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use saral_core::types::AuditLog;

use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 100;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/audit-logs", get(list))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// GET /api/audit-logs?limit=N - most recent entries first
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<AuditLog>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 1000);
    Ok(Json(state.db.audit().list_recent(limit).await?))
}
