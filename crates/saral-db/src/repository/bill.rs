//! # Bill Repository
//!
//! Read side of invoices. Bills are created only by the checkout
//! engine and are immutable afterwards, so this repository exposes no
//! update or delete.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use saral_core::types::{Bill, BillItem};

use crate::error::{DbError, DbResult};

const BILL_COLUMNS: &str = "id, bill_number, customer_id, customer_name, customer_phone, \
     customer_address, customer_state, subtotal_paise, discount_bps, discount_paise, \
     cgst_paise, sgst_paise, igst_paise, gst_paise, grand_total_paise, \
     total_cost_paise, total_profit_paise, payment_mode, created_by, created_at";

const ITEM_COLUMNS: &str = "id, bill_id, product_id, name_snapshot, hsn_code_snapshot, \
     quantity, cost_price_paise, unit_price_paise, line_subtotal_paise, \
     line_profit_paise, created_at";

/// A bill header together with its line items, for invoice drill-down.
#[derive(Debug, Clone, Serialize)]
pub struct BillWithItems {
    #[serde(flatten)]
    pub bill: Bill,
    pub items: Vec<BillItem>,
}

/// Repository for invoice reads.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Most recent bills first, capped at `limit`.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<Bill>> {
        let bills = sqlx::query_as::<_, Bill>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills ORDER BY created_at DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = bills.len(), "Listed recent bills");
        Ok(bills)
    }

    /// Fetches a bill by UUID or by its human-readable invoice number,
    /// with all its items. Cashiers search by the printed number.
    pub async fn get_with_items(&self, id_or_number: &str) -> DbResult<BillWithItems> {
        let bill = sqlx::query_as::<_, Bill>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE id = ?1 OR bill_number = ?1"
        ))
        .bind(id_or_number)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Bill", id_or_number))?;

        let items = self.get_items(&bill.id).await?;
        Ok(BillWithItems { bill, items })
    }

    /// Line items of a bill, in insertion order.
    pub async fn get_items(&self, bill_id: &str) -> DbResult<Vec<BillItem>> {
        let items = sqlx::query_as::<_, BillItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM bill_items WHERE bill_id = ?1 ORDER BY rowid"
        ))
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

// =============================================================================
// Integration Tests
// =============================================================================
