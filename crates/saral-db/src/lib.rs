//! # saral-db: Database Layer for Saral POS
//!
//! This crate provides database access for Saral POS. It uses SQLite
//! for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Saral POS Data Flow                        │
//! │                                                                 │
//! │  axum handler (POST /api/checkout)                              │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  saral-db (THIS CRATE)                    │  │
//! │  │                                                           │  │
//! │  │  ┌────────────┐  ┌──────────────┐  ┌──────────────────┐  │  │
//! │  │  │  Database  │  │ Repositories │  │ Checkout Engine  │  │  │
//! │  │  │  (pool.rs) │◄─│  product     │  │  one txn:        │  │  │
//! │  │  │            │  │  customer    │  │  seq bump        │  │  │
//! │  │  │ SqlitePool │  │  bill        │  │  stock decrement │  │  │
//! │  │  │ WAL mode   │  │  audit       │  │  bill + items    │  │  │
//! │  │  └────────────┘  └──────────────┘  └──────────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │                     SQLite database file                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`checkout`] - The transactional checkout engine
//!
//! ## Usage
//!
//! ```rust,ignore
//! use saral_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./saral.db")).await?;
//! let receipt = db.checkout().process(request).await?;
//! ```

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use checkout::{CheckoutEngine, CheckoutReceipt, CheckoutRequest};
pub use error::{DbError, StoreError};
pub use pool::{Database, DbConfig};

pub use repository::audit::AuditRepository;
pub use repository::bill::{BillRepository, BillWithItems};
pub use repository::customer::{CustomerRepository, CustomerUpdate, NewCustomer};
pub use repository::product::{NewProduct, ProductRepository, ProductUpdate};
