//! # Audit Log Repository
//!
//! Append-only trail of user actions. Writes are best effort from the
//! callers' point of view: an audit failure must never undo or block
//! the action it describes.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use saral_core::types::AuditLog;

use crate::error::DbResult;

/// Repository for the audit trail.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: SqlitePool,
}

impl AuditRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AuditRepository { pool }
    }

    /// Appends one entry. `details` is stored as a JSON document.
    pub async fn log(
        &self,
        action: &str,
        user_id: Option<&str>,
        username: &str,
        details: serde_json::Value,
    ) -> DbResult<AuditLog> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, action, user_id, username, details, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&id)
        .bind(action)
        .bind(user_id)
        .bind(username)
        .bind(details.to_string())
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(action, username, "Audit entry written");

        Ok(AuditLog {
            id,
            action: action.to_string(),
            user_id: user_id.map(str::to_string),
            username: username.to_string(),
            details: details.to_string(),
            created_at: now,
        })
    }

    /// Most recent entries first, capped at `limit`.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<AuditLog>> {
        let entries = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT id, action, user_id, username, details, created_at
            FROM audit_logs
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_log_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.audit();

        let entry = repo
            .log(
                "PRODUCT_ADDED",
                Some("u1"),
                "admin",
                serde_json::json!({"name": "LED Bulb"}),
            )
            .await
            .unwrap();
        assert_eq!(entry.action, "PRODUCT_ADDED");

        let entries = repo.list_recent(50).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].username, "admin");

        let details: serde_json::Value = serde_json::from_str(&entries[0].details).unwrap();
        assert_eq!(details["name"], "LED Bulb");
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.audit();

        for i in 0..5 {
            repo.log("TEST_ACTION", None, "system", serde_json::json!({ "i": i }))
                .await
                .unwrap();
        }

        assert_eq!(repo.list_recent(3).await.unwrap().len(), 3);
    }
}
