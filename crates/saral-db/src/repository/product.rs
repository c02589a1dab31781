//! # Product Repository
//!
//! Catalog reads and writes. Stock decrements during a sale do NOT go
//! through here; the checkout engine owns those inside its transaction.

use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use saral_core::types::Product;
use saral_core::validation::{validate_hsn_code, validate_name, validate_price_paise};
use saral_core::{CoreError, DEFAULT_HSN_CODE};

use crate::error::{DbError, DbResult, StoreResult};

const PRODUCT_COLUMNS: &str = "id, name, hsn_code, quantity, cost_price_paise, \
     sale_price_paise, min_stock, category, is_active, created_at, updated_at";

// =============================================================================
// Input Types
// =============================================================================

/// Fields for creating a product. Deserialized straight from the
/// request body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub hsn_code: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub cost_price_paise: i64,
    pub sale_price_paise: i64,
    #[serde(default)]
    pub min_stock: i64,
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub hsn_code: Option<String>,
    pub quantity: Option<i64>,
    pub cost_price_paise: Option<i64>,
    pub sale_price_paise: Option<i64>,
    pub min_stock: Option<i64>,
    pub category: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all active products, name order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = 1 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Fetches one product by id, active or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Creates a product. Blank HSN codes get the default
    /// classification.
    pub async fn insert(&self, new: NewProduct) -> StoreResult<Product> {
        validate_name(&new.name).map_err(CoreError::from)?;
        validate_hsn_code(&new.hsn_code).map_err(CoreError::from)?;
        validate_price_paise(new.sale_price_paise).map_err(CoreError::from)?;
        validate_price_paise(new.cost_price_paise).map_err(CoreError::from)?;

        let hsn_code = {
            let trimmed = new.hsn_code.trim();
            if trimmed.is_empty() {
                DEFAULT_HSN_CODE.to_string()
            } else {
                trimmed.to_string()
            }
        };

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO products (id, name, hsn_code, quantity, cost_price_paise,
                                  sale_price_paise, min_stock, category, is_active,
                                  created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, ?9, ?9)
            "#,
        )
        .bind(&id)
        .bind(new.name.trim())
        .bind(&hsn_code)
        .bind(new.quantity.max(0))
        .bind(new.cost_price_paise)
        .bind(new.sale_price_paise)
        .bind(new.min_stock.max(0))
        .bind(&new.category)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        debug!(id = %id, "Product created");
        Ok(self.get_by_id(&id).await?)
    }

    /// Applies a partial update to a product.
    pub async fn update(&self, id: &str, update: ProductUpdate) -> StoreResult<Product> {
        if let Some(ref name) = update.name {
            validate_name(name).map_err(CoreError::from)?;
        }
        if let Some(ref code) = update.hsn_code {
            validate_hsn_code(code).map_err(CoreError::from)?;
        }
        if let Some(price) = update.sale_price_paise {
            validate_price_paise(price).map_err(CoreError::from)?;
        }
        if let Some(price) = update.cost_price_paise {
            validate_price_paise(price).map_err(CoreError::from)?;
        }

        let current = self.get_by_id(id).await?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, hsn_code = ?3, quantity = ?4, cost_price_paise = ?5,
                sale_price_paise = ?6, min_stock = ?7, category = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(update.name.unwrap_or(current.name))
        .bind(update.hsn_code.unwrap_or(current.hsn_code))
        .bind(update.quantity.unwrap_or(current.quantity).max(0))
        .bind(update.cost_price_paise.unwrap_or(current.cost_price_paise))
        .bind(update.sale_price_paise.unwrap_or(current.sale_price_paise))
        .bind(update.min_stock.unwrap_or(current.min_stock))
        .bind(update.category.or(current.category))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id).into());
        }

        Ok(self.get_by_id(id).await?)
    }

    /// Soft-deletes a product. It disappears from listings and stops
    /// being sellable, but existing bill items keep their snapshots.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1 AND is_active = 1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        debug!(id, "Product soft-deleted");
        Ok(())
    }

    /// Active products at or below their minimum-stock threshold.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 AND quantity <= min_stock ORDER BY quantity"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Number of active products.
    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .products()
    }

    fn new_bulb() -> NewProduct {
        NewProduct {
            name: "LED Bulb 9W".to_string(),
            hsn_code: "9405".to_string(),
            quantity: 50,
            cost_price_paise: 6000,
            sale_price_paise: 10000,
            min_stock: 10,
            category: Some("Lighting".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;

        let product = repo.insert(new_bulb()).await.unwrap();
        assert_eq!(product.name, "LED Bulb 9W");
        assert_eq!(product.quantity, 50);
        assert!(product.is_active);

        let fetched = repo.get_by_id(&product.id).await.unwrap();
        assert_eq!(fetched.sale_price_paise, 10000);
    }

    #[tokio::test]
    async fn test_blank_hsn_gets_default() {
        let repo = repo().await;

        let mut new = new_bulb();
        new.hsn_code = "  ".to_string();
        let product = repo.insert(new).await.unwrap();
        assert_eq!(product.hsn_code, DEFAULT_HSN_CODE);
    }

    #[tokio::test]
    async fn test_insert_rejects_empty_name() {
        let repo = repo().await;

        let mut new = new_bulb();
        new.name = "   ".to_string();
        let err = repo.insert(new).await.unwrap_err();
        // Validation failures come back on the Core side of the union
        assert!(matches!(err, crate::error::StoreError::Core(_)));
    }

    #[tokio::test]
    async fn test_partial_update() {
        let repo = repo().await;
        let product = repo.insert(new_bulb()).await.unwrap();

        let updated = repo
            .update(
                &product.id,
                ProductUpdate {
                    sale_price_paise: Some(12000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.sale_price_paise, 12000);
        // Untouched fields survive
        assert_eq!(updated.name, "LED Bulb 9W");
        assert_eq!(updated.quantity, 50);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_listing() {
        let repo = repo().await;
        let product = repo.insert(new_bulb()).await.unwrap();

        repo.soft_delete(&product.id).await.unwrap();

        assert!(repo.list().await.unwrap().is_empty());
        // Still reachable by id for invoice drill-down
        let fetched = repo.get_by_id(&product.id).await.unwrap();
        assert!(!fetched.is_active);

        // Second delete is a NotFound
        assert!(repo.soft_delete(&product.id).await.is_err());
    }

    #[tokio::test]
    async fn test_low_stock_report() {
        let repo = repo().await;

        let mut low = new_bulb();
        low.quantity = 5; // min_stock is 10
        repo.insert(low).await.unwrap();

        let mut fine = new_bulb();
        fine.name = "Ceiling Fan".to_string();
        fine.quantity = 40;
        repo.insert(fine).await.unwrap();

        let report = repo.low_stock().await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].name, "LED Bulb 9W");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = repo().await;
        let err = repo.get_by_id("nope").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
