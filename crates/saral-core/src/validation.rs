//! # Validation Module
//!
//! Input validation utilities for Saral POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Layer 1: HTTP handler (axum)                                 │
//! │  ├── Type validation (deserialization)                        │
//! │  └── THIS MODULE: business rule validation                    │
//! │           │                                                   │
//! │           ▼                                                   │
//! │  Layer 2: Database (SQLite)                                   │
//! │  ├── NOT NULL / UNIQUE constraints                            │
//! │  ├── CHECK (quantity >= 0)                                    │
//! │  └── Foreign key constraints                                  │
//! │                                                               │
//! │  Defense in depth: multiple layers catch different errors     │
//! └───────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::CartLine;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product or customer name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an HSN tax classification code.
///
/// ## Rules
/// - May be empty (a default is substituted on insert)
/// - At most 8 characters, digits only
pub fn validate_hsn_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Ok(());
    }

    if code.len() > 8 {
        return Err(ValidationError::TooLong {
            field: "hsn_code".to_string(),
            max: 8,
        });
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "hsn_code".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in paise.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a checkout discount percentage.
///
/// ## Rules
/// - Must be a finite number between 0 and 100 inclusive
pub fn validate_discount_percent(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a whole cart: non-empty, not oversized, every line with a
/// product id and a sane quantity.
///
/// Returning `Ok` here does not mean the cart will check out; stock
/// and product existence are only known to the database layer.
pub fn validate_cart(lines: &[CartLine]) -> ValidationResult<()> {
    if lines.len() > MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart".to_string(),
            min: 1,
            max: MAX_CART_LINES as i64,
        });
    }

    for line in lines {
        if line.product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "product_id".to_string(),
            });
        }
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("LED Bulb 9W").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_hsn_code() {
        assert!(validate_hsn_code("9405").is_ok());
        assert!(validate_hsn_code("").is_ok()); // optional
        assert!(validate_hsn_code("94051000").is_ok());
        assert!(validate_hsn_code("940510001").is_err()); // too long
        assert!(validate_hsn_code("94O5").is_err()); // letter O
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_paise() {
        assert!(validate_price_paise(0).is_ok());
        assert!(validate_price_paise(1099).is_ok());
        assert!(validate_price_paise(-100).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(0.0).is_ok());
        assert!(validate_discount_percent(10.0).is_ok());
        assert!(validate_discount_percent(100.0).is_ok());

        assert!(validate_discount_percent(-0.1).is_err());
        assert!(validate_discount_percent(100.1).is_err());
        assert!(validate_discount_percent(f64::NAN).is_err());
        assert!(validate_discount_percent(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_cart() {
        let good = vec![CartLine {
            product_id: "p1".to_string(),
            quantity: 2,
        }];
        assert!(validate_cart(&good).is_ok());

        let blank_id = vec![CartLine {
            product_id: "  ".to_string(),
            quantity: 2,
        }];
        assert!(validate_cart(&blank_id).is_err());

        let bad_qty = vec![CartLine {
            product_id: "p1".to_string(),
            quantity: 0,
        }];
        assert!(validate_cart(&bad_qty).is_err());

        let oversized: Vec<CartLine> = (0..=MAX_CART_LINES)
            .map(|i| CartLine {
                product_id: format!("p{i}"),
                quantity: 1,
            })
            .collect();
        assert!(validate_cart(&oversized).is_err());
    }
}
