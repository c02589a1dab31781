//! # Error Types
//!
//! Domain-specific error types for saral-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  saral-core errors (this file)                                │
//! │  ├── CoreError        - Business rule violations              │
//! │  └── ValidationError  - Input validation failures             │
//! │                                                               │
//! │  saral-db errors (separate crate)                             │
//! │  ├── DbError          - Database operation failures           │
//! │  └── StoreError       - Core ∪ Db, from validated writes      │
//! │                                                               │
//! │  server errors (apps/server)                                  │
//! │  └── ApiError         - What the HTTP client sees             │
//! │                                                               │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations in the checkout path.
///
/// Every variant maps to a structured result returned to the caller;
/// nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was requested with no cart lines. Rejected before any
    /// write.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart line names a product id that does not exist. The whole
    /// cart is rejected: a partial invoice was never what the cashier
    /// asked for.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A cart line asks for more than the on-hand quantity. The whole
    /// transaction aborts; no stock changes, no bill is written.
    #[error("Insufficient stock for {name}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, caught before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_match_api_contract() {
        // These strings are part of the JSON error contract and must
        // not drift.
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");

        let err = CoreError::InsufficientStock {
            name: "LED Bulb".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(err.to_string(), "Insufficient stock for LED Bulb");

        let err = CoreError::ProductNotFound("abc-123".to_string());
        assert_eq!(err.to_string(), "Product not found: abc-123");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
