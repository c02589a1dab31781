//! # saral-core: Pure Business Logic for Saral POS
//!
//! This crate is the heart of Saral POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Saral POS Architecture                      │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  apps/server (axum)                       │  │
//! │  │    POST /api/checkout ── products ── customers ── ...     │  │
//! │  └─────────────────────────────┬─────────────────────────────┘  │
//! │                                │                                │
//! │  ┌─────────────────────────────▼─────────────────────────────┐  │
//! │  │               ★ saral-core (THIS CRATE) ★                 │  │
//! │  │                                                           │  │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────┐  │  │
//! │  │   │  types   │ │  money   │ │ checkout │ │ validation │  │  │
//! │  │   │ Product  │ │  Money   │ │ GST split│ │   rules    │  │  │
//! │  │   │  Bill    │ │  Rate    │ │  totals  │ │   checks   │  │  │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └────────────┘  │  │
//! │  │                                                           │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS      │  │
//! │  └─────────────────────────────┬─────────────────────────────┘  │
//! │                                │                                │
//! │  ┌─────────────────────────────▼─────────────────────────────┐  │
//! │  │                  saral-db (Database Layer)                │  │
//! │  │          SQLite queries, migrations, repositories         │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Bill, BillItem, ...)
//! - [`money`] - Money type with integer paise arithmetic (no floating point!)
//! - [`checkout`] - The pure checkout computation: line pricing, discount,
//!   CGST/SGST/IGST split, rupee-rounded grand total, profit
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use checkout::{compute_totals, CheckoutTotals, PricedLine};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name recorded on a bill when no customer is attached to the sale.
///
/// Anonymous counter sales are the common case in a small retail shop;
/// the bill still needs a customer snapshot, so this sentinel fills it.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

/// HSN code recorded when a product has none assigned.
pub const DEFAULT_HSN_CODE: &str = "9999";

/// Maximum distinct lines allowed in a single cart.
///
/// Prevents runaway carts and keeps the checkout transaction short.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in a cart.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
