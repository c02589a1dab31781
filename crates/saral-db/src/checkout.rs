//! # Checkout Engine
//!
//! The one multi-step write path in Saral POS: turning a validated cart
//! into an invoice. Everything happens inside a single SQLite
//! transaction so a sale either fully happens or leaves no trace.
//!
//! ## Transaction Shape
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                        │
//! │    1. bump bill_sequences(year)  ← first write: takes the     │
//! │       RETURNING next_seq           writer lock, serializing   │
//! │                                    concurrent checkouts       │
//! │    2. per cart line:                                          │
//! │       fetch product        → ProductNotFound aborts           │
//! │       guarded decrement    → InsufficientStock aborts         │
//! │    3. compute totals (saral-core, pure)                       │
//! │    4. INSERT bill + bill_items                                │
//! │  COMMIT                                                       │
//! │                                                               │
//! │  post-commit: SALE_COMPLETED audit entry (best effort)        │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any error between BEGIN and COMMIT rolls the whole thing back:
//! no bill row, no stock change, no consumed invoice number gap other
//! than the sequence value itself.

use chrono::{Datelike, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use saral_core::checkout::{compute_totals, CheckoutTotals, PricedLine};
use saral_core::error::CoreError;
use saral_core::types::{CartLine, Customer, CustomerSnapshot, Product, Rate, TaxJurisdiction};
use saral_core::validation::validate_cart;

use crate::error::StoreResult;
use crate::repository::audit::AuditRepository;

// =============================================================================
// Request / Receipt
// =============================================================================

/// Everything the engine needs to process one sale.
///
/// Built by the HTTP layer from the request body plus the acting
/// user's identity.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Requested cart lines. Must be non-empty.
    pub cart: Vec<CartLine>,

    /// Optional customer reference. `None`, or an id that doesn't
    /// resolve, falls back to the walk-in sentinel.
    pub customer_id: Option<String>,

    /// Discount rate applied to the subtotal.
    pub discount: Rate,

    /// Buyer state relative to the seller; `"Same"` selects
    /// CGST + SGST, anything else IGST.
    pub customer_state: String,

    /// Payment tag (cash/card/upi/...). Stored lowercased.
    pub payment_mode: String,

    /// Acting user, for the audit trail.
    pub user_id: Option<String>,
    pub username: String,
}

/// What a successful checkout hands back to the caller.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub bill_id: String,
    pub bill_number: String,
    pub customer_name: String,
    pub totals: CheckoutTotals,
}

// =============================================================================
// Engine
// =============================================================================

/// Processes checkouts against a pool. Cheap to construct per request.
#[derive(Debug, Clone)]
pub struct CheckoutEngine {
    pool: SqlitePool,
}

impl CheckoutEngine {
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutEngine { pool }
    }

    /// Runs one sale end to end.
    ///
    /// ## Guarantees
    /// - Atomic: stock decrements, the bill and its items commit
    ///   together or not at all
    /// - Bill numbers are unique even under concurrent checkouts
    /// - Stock never goes negative
    pub async fn process(&self, request: CheckoutRequest) -> StoreResult<CheckoutReceipt> {
        if request.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        validate_cart(&request.cart)?;

        let payment_mode = {
            let tag = request.payment_mode.trim().to_lowercase();
            if tag.is_empty() {
                "cash".to_string()
            } else {
                tag
            }
        };

        let customer = self.resolve_customer(request.customer_id.as_deref()).await?;
        let jurisdiction = TaxJurisdiction::from_customer_state(&request.customer_state);

        let mut tx = self.pool.begin().await?;

        // First write of the transaction: the sequence bump. This takes
        // SQLite's writer lock, so concurrent checkouts queue here and
        // each sees its own sequence value.
        let now = Utc::now();
        let year = now.year();
        let seq: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bill_sequences (year, next_seq) VALUES (?1, 1)
            ON CONFLICT(year) DO UPDATE SET next_seq = next_seq + 1
            RETURNING next_seq
            "#,
        )
        .bind(year)
        .fetch_one(&mut *tx)
        .await?;

        let bill_number = format!("INV-{}-{:04}", year, seq);
        debug!(bill_number = %bill_number, lines = request.cart.len(), "Checkout started");

        // Price each line against live product rows, decrementing stock
        // as we go. Any miss aborts the whole cart.
        let mut priced = Vec::with_capacity(request.cart.len());
        for line in &request.cart {
            let product = sqlx::query_as::<_, Product>(
                r#"
                SELECT id, name, hsn_code, quantity, cost_price_paise,
                       sale_price_paise, min_stock, category, is_active,
                       created_at, updated_at
                FROM products
                WHERE id = ?1 AND is_active = 1
                "#,
            )
            .bind(&line.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

            // Guarded decrement: the WHERE clause is the authoritative
            // stock check. Zero rows means the shelf is short.
            let decremented = sqlx::query(
                r#"
                UPDATE products
                SET quantity = quantity - ?2, updated_at = ?3
                WHERE id = ?1 AND quantity >= ?2
                "#,
            )
            .bind(&line.product_id)
            .bind(line.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if decremented.rows_affected() == 0 {
                return Err(CoreError::InsufficientStock {
                    name: product.name,
                    available: product.quantity,
                    requested: line.quantity,
                }
                .into());
            }

            let unit_price = product.sale_price();
            let cost_price = product.cost_price();
            priced.push(PricedLine {
                product_id: product.id,
                name: product.name,
                hsn_code: product.hsn_code,
                quantity: line.quantity,
                unit_price,
                cost_price,
            });
        }

        let totals = compute_totals(&priced, request.discount, jurisdiction);

        let bill_id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO bills (
                id, bill_number, customer_id, customer_name, customer_phone,
                customer_address, customer_state, subtotal_paise, discount_bps,
                discount_paise, cgst_paise, sgst_paise, igst_paise, gst_paise,
                grand_total_paise, total_cost_paise, total_profit_paise,
                payment_mode, created_by, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20
            )
            "#,
        )
        .bind(&bill_id)
        .bind(&bill_number)
        .bind(&customer.customer_id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&request.customer_state)
        .bind(totals.subtotal.paise())
        .bind(totals.discount_rate.bps() as i64)
        .bind(totals.discount.paise())
        .bind(totals.cgst.paise())
        .bind(totals.sgst.paise())
        .bind(totals.igst.paise())
        .bind(totals.gst.paise())
        .bind(totals.grand_total.paise())
        .bind(totals.total_cost.paise())
        .bind(totals.total_profit.paise())
        .bind(&payment_mode)
        .bind(&request.username)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for line in &priced {
            sqlx::query(
                r#"
                INSERT INTO bill_items (
                    id, bill_id, product_id, name_snapshot, hsn_code_snapshot,
                    quantity, cost_price_paise, unit_price_paise,
                    line_subtotal_paise, line_profit_paise, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&bill_id)
            .bind(&line.product_id)
            .bind(&line.name)
            .bind(&line.hsn_code)
            .bind(line.quantity)
            .bind(line.cost_price.paise())
            .bind(line.unit_price.paise())
            .bind(line.line_subtotal().paise())
            .bind(line.line_profit().paise())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            bill_number = %bill_number,
            grand_total_paise = totals.grand_total.paise(),
            "Checkout complete"
        );

        // The sale is already committed; a failed audit write must not
        // surface to the cashier.
        self.write_audit(&request, &bill_id, &bill_number, &customer, &totals)
            .await;

        Ok(CheckoutReceipt {
            bill_id,
            bill_number,
            customer_name: customer.name,
            totals,
        })
    }

    /// Looks up the named customer, falling back to the walk-in
    /// sentinel when no id was given or the id doesn't resolve.
    async fn resolve_customer(
        &self,
        customer_id: Option<&str>,
    ) -> StoreResult<CustomerSnapshot> {
        let Some(id) = customer_id.filter(|id| !id.trim().is_empty()) else {
            return Ok(CustomerSnapshot::walk_in());
        };

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, address, place, pincode, state,
                   customer_type, created_at, updated_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match customer {
            Some(ref c) => CustomerSnapshot::from(c),
            None => {
                debug!(customer_id = id, "Customer not found, billing as walk-in");
                CustomerSnapshot::walk_in()
            }
        })
    }

    async fn write_audit(
        &self,
        request: &CheckoutRequest,
        bill_id: &str,
        bill_number: &str,
        customer: &CustomerSnapshot,
        totals: &CheckoutTotals,
    ) {
        let details = serde_json::json!({
            "bill_id": bill_id,
            "bill_number": bill_number,
            "customer_name": customer.name,
            "item_count": request.cart.len(),
            "grand_total_paise": totals.grand_total.paise(),
            "total_profit_paise": totals.total_profit.paise(),
        });

        let audit = AuditRepository::new(self.pool.clone());
        if let Err(e) = audit
            .log(
                "SALE_COMPLETED",
                request.user_id.as_deref(),
                &request.username,
                details,
            )
            .await
        {
            warn!(error = %e, bill_number, "Audit write failed after checkout");
        }
    }
}

// =============================================================================
// Integration Tests
// =============================================================================
