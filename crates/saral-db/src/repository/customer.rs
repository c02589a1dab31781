//! # Customer Repository
//!
//! Customer records exist so the checkout can snapshot them onto bills
//! and so GST jurisdiction can be derived from their state flag.

use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use saral_core::types::Customer;
use saral_core::validation::validate_name;
use saral_core::CoreError;

use crate::error::{DbError, DbResult, StoreResult};

const CUSTOMER_COLUMNS: &str =
    "id, name, phone, address, place, pincode, state, customer_type, created_at, updated_at";

// =============================================================================
// Input Types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    /// Relative to the seller: "Same" or "Other".
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub customer_type: Option<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub place: Option<String>,
    pub pincode: Option<String>,
    pub state: Option<String>,
    pub customer_type: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for customer record operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers, name order.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Fetches one customer by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Customer> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Customer", id))
    }

    /// Creates a customer.
    pub async fn insert(&self, new: NewCustomer) -> StoreResult<Customer> {
        validate_name(&new.name).map_err(CoreError::from)?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, phone, address, place, pincode,
                                   state, customer_type, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            "#,
        )
        .bind(&id)
        .bind(new.name.trim())
        .bind(&new.phone)
        .bind(&new.address)
        .bind(&new.place)
        .bind(&new.pincode)
        .bind(&new.state)
        .bind(new.customer_type.as_deref().unwrap_or("B2C"))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        debug!(id = %id, "Customer created");
        Ok(self.get_by_id(&id).await?)
    }

    /// Applies a partial update to a customer.
    pub async fn update(
        &self,
        id: &str,
        update: CustomerUpdate,
    ) -> StoreResult<Customer> {
        if let Some(ref name) = update.name {
            validate_name(name).map_err(CoreError::from)?;
        }

        let current = self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE customers
            SET name = ?2, phone = ?3, address = ?4, place = ?5, pincode = ?6,
                state = ?7, customer_type = ?8, updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(update.name.unwrap_or(current.name))
        .bind(update.phone.or(current.phone))
        .bind(update.address.or(current.address))
        .bind(update.place.or(current.place))
        .bind(update.pincode.or(current.pincode))
        .bind(update.state.or(current.state))
        .bind(update.customer_type.unwrap_or(current.customer_type))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(self.get_by_id(id).await?)
    }

    /// Deletes a customer. Bills keep their snapshots; only the live
    /// record goes.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        debug!(id, "Customer deleted");
        Ok(())
    }
}

// =============================================================================
// Integration Tests
// =============================================================================
