//! # Domain Types
//!
//! Core domain types used throughout Saral POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        Domain Types                           │
//! │                                                               │
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────────────┐      │
//! │  │    Product    │  │   Customer    │  │     Bill      │      │
//! │  │  ───────────  │  │  ───────────  │  │  ───────────  │      │
//! │  │  id (UUID)    │  │  id (UUID)    │  │  id (UUID)    │      │
//! │  │  hsn_code     │  │  state        │  │  bill_number  │      │
//! │  │  quantity     │  │  customer_type│  │  gst split    │      │
//! │  │  prices       │  │  contact      │  │  grand total  │      │
//! │  └───────────────┘  └───────────────┘  └───────┬───────┘      │
//! │                                                │ owns         │
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────▼───────┐      │
//! │  │     Rate      │  │   CartLine    │  │   BillItem    │      │
//! │  │  bps (u32)    │  │  product_id   │  │  snapshots    │      │
//! │  │  900 = 9%     │  │  quantity     │  │  line figures │      │
//! │  └───────────────┘  └───────────────┘  └───────────────┘      │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Entities have an immutable UUID `id` for relations plus a
//! human-readable business key where one exists (`bill_number`).
//!
//! ## Snapshot Pattern
//! A `Bill` denormalizes customer fields and each `BillItem`
//! denormalizes product fields at sale time. Invoices must never
//! change retroactively when the catalog or customer records do.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::WALK_IN_CUSTOMER;

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate in basis points (bps), used for GST components
/// and the checkout discount.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. 900 bps = 9% (CGST/SGST each),
/// 1800 bps = 18% (IGST). Integer bps keep all rate arithmetic exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (e.g. a request's
    /// `discount_percent`). Rounds to the nearest basis point.
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Tax Jurisdiction
// =============================================================================

/// Which GST branch applies to a sale.
///
/// Indian GST splits by where the buyer is relative to the seller:
/// intra-state sales pay CGST + SGST (9% + 9%), inter-state sales pay
/// IGST (18%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxJurisdiction {
    /// Buyer in the seller's state: CGST 9% + SGST 9%.
    IntraState,
    /// Buyer in a different state: IGST 18%.
    InterState,
}

impl TaxJurisdiction {
    /// Maps the checkout request's `customer_state` flag. The literal
    /// value `"Same"` selects intra-state taxation; anything else is
    /// inter-state.
    pub fn from_customer_state(state: &str) -> Self {
        if state == "Same" {
            TaxJurisdiction::IntraState
        } else {
            TaxJurisdiction::InterState
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to cashier and on invoices.
    pub name: String,

    /// HSN tax classification code.
    pub hsn_code: String,

    /// On-hand quantity. Never goes negative through checkout.
    pub quantity: i64,

    /// Cost price in paise (for profit accounting).
    pub cost_price_paise: i64,

    /// Sale price in paise.
    pub sale_price_paise: i64,

    /// Minimum-stock threshold for the low-stock report.
    pub min_stock: i64,

    /// Optional category tag.
    pub category: Option<String>,

    /// Whether the product is active (soft delete).
    pub is_active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the sale price as Money.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_paise(self.sale_price_paise)
    }

    /// Returns the cost price as Money.
    #[inline]
    pub fn cost_price(&self) -> Money {
        Money::from_paise(self.cost_price_paise)
    }

    /// Checks whether stock has fallen to or below the threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record. Read-only from the checkout engine's
/// perspective; checkout only snapshots it onto the bill.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub place: Option<String>,
    pub pincode: Option<String>,
    /// State of residence, relative to the seller ("Same"/"Other").
    pub state: Option<String>,
    /// B2B or B2C classification.
    pub customer_type: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// The customer fields frozen onto a bill at sale time.
///
/// Resolved from a `Customer` row when the request names one, or the
/// walk-in sentinel when it doesn't (or the id doesn't resolve).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSnapshot {
    pub customer_id: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub address: String,
}

impl CustomerSnapshot {
    /// The anonymous counter-sale sentinel: empty contact fields.
    pub fn walk_in() -> Self {
        CustomerSnapshot {
            customer_id: None,
            name: WALK_IN_CUSTOMER.to_string(),
            phone: None,
            address: String::new(),
        }
    }
}

impl From<&Customer> for CustomerSnapshot {
    fn from(c: &Customer) -> Self {
        CustomerSnapshot {
            customer_id: Some(c.id.clone()),
            name: c.name.clone(),
            phone: c.phone.clone(),
            address: c.address.clone().unwrap_or_default(),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One requested line of a checkout cart. Transient: consumed to
/// produce `BillItem` snapshots, never persisted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,
}

// =============================================================================
// Bill
// =============================================================================

/// An invoice header. Created exactly once per successful checkout and
/// immutable thereafter (no update/delete path).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Bill {
    pub id: String,
    /// Human-readable invoice number: `INV-<year>-<seq:04>`, unique.
    pub bill_number: String,
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: String,
    /// The state flag the sale was taxed under ("Same"/other).
    pub customer_state: String,
    pub subtotal_paise: i64,
    /// Discount rate applied, in basis points.
    pub discount_bps: i64,
    pub discount_paise: i64,
    pub cgst_paise: i64,
    pub sgst_paise: i64,
    pub igst_paise: i64,
    pub gst_paise: i64,
    /// Whole-rupee grand total, stored in paise.
    pub grand_total_paise: i64,
    pub total_cost_paise: i64,
    pub total_profit_paise: i64,
    /// Free-form lower-cased payment tag (cash/card/upi/...).
    pub payment_mode: String,
    /// Username of the acting user.
    pub created_by: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Bill Item
// =============================================================================

/// A line item of a bill. Product fields are frozen at sale time;
/// the row is cascade-deleted with its bill.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BillItem {
    pub id: String,
    pub bill_id: String,
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// HSN code at time of sale (frozen).
    pub hsn_code_snapshot: String,
    pub quantity: i64,
    pub cost_price_paise: i64,
    pub unit_price_paise: i64,
    /// unit price × quantity.
    pub line_subtotal_paise: i64,
    /// line subtotal − cost × quantity.
    pub line_profit_paise: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Audit Log
// =============================================================================

/// An audit trail entry recording a user action.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct AuditLog {
    pub id: String,
    /// Action tag, e.g. "SALE_COMPLETED", "PRODUCT_ADDED".
    pub action: String,
    pub user_id: Option<String>,
    pub username: String,
    /// Action details as a JSON document.
    pub details: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(900);
        assert_eq!(rate.bps(), 900);
        assert!((rate.percentage() - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_rate_from_percentage() {
        assert_eq!(Rate::from_percentage(10.0).bps(), 1000);
        assert_eq!(Rate::from_percentage(12.5).bps(), 1250);
    }

    #[test]
    fn test_jurisdiction_from_customer_state() {
        assert_eq!(
            TaxJurisdiction::from_customer_state("Same"),
            TaxJurisdiction::IntraState
        );
        assert_eq!(
            TaxJurisdiction::from_customer_state("Other"),
            TaxJurisdiction::InterState
        );
        // Only the exact literal selects the intra-state branch
        assert_eq!(
            TaxJurisdiction::from_customer_state("same"),
            TaxJurisdiction::InterState
        );
        assert_eq!(
            TaxJurisdiction::from_customer_state(""),
            TaxJurisdiction::InterState
        );
    }

    #[test]
    fn test_walk_in_snapshot() {
        let snap = CustomerSnapshot::walk_in();
        assert_eq!(snap.name, WALK_IN_CUSTOMER);
        assert!(snap.customer_id.is_none());
        assert!(snap.phone.is_none());
        assert!(snap.address.is_empty());
    }

    #[test]
    fn test_low_stock() {
        let mut product = Product {
            id: "p1".to_string(),
            name: "Soldering Iron".to_string(),
            hsn_code: "8515".to_string(),
            quantity: 5,
            cost_price_paise: 20000,
            sale_price_paise: 35000,
            min_stock: 5,
            category: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(product.is_low_stock());
        product.quantity = 6;
        assert!(!product.is_low_stock());
    }
}
