//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                   │
//! │                                                               │
//! │  In JavaScript/floating point:                                │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                 │
//! │                                                               │
//! │  OUR SOLUTION: Integer Paise                                  │
//! │    ₹10.99 is stored as 1099 paise (i64)                       │
//! │    GST and discounts are basis-point integer arithmetic       │
//! │    Rounding happens exactly once per figure, explicitly       │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use saral_core::money::Money;
//! use saral_core::types::Rate;
//!
//! let price = Money::from_paise(10000); // ₹100.00
//!
//! // 9% CGST on ₹100.00 = ₹9.00
//! let cgst = price.portion(Rate::from_bps(900));
//! assert_eq!(cgst.paise(), 900);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections/refund math
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a basis-point rate and returns that portion, rounded to
    /// the nearest paise (half up).
    ///
    /// This is the single rounding point for GST components and the
    /// discount amount.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The `+5000`
    /// provides the rounding (5000/10000 = 0.5). i128 intermediate
    /// prevents overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use saral_core::money::Money;
    /// use saral_core::types::Rate;
    ///
    /// // ₹180.00 at 9% = ₹16.20
    /// let after_discount = Money::from_paise(18000);
    /// assert_eq!(after_discount.portion(Rate::from_bps(900)).paise(), 1620);
    /// ```
    pub fn portion(&self, rate: Rate) -> Money {
        let paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(paise as i64)
    }

    /// Rounds to the nearest whole rupee, half away from lower values.
    ///
    /// Matches `Math.round` semantics (`floor(x + 0.5)`): invoices and
    /// the dashboard show whole-rupee grand totals, and the stored
    /// grand total must agree with what was printed.
    ///
    /// ## Example
    /// ```rust
    /// use saral_core::money::Money;
    ///
    /// // ₹212.40 → ₹212
    /// assert_eq!(Money::from_paise(21240).round_to_rupee().paise(), 21200);
    /// // ₹212.50 → ₹213
    /// assert_eq!(Money::from_paise(21250).round_to_rupee().paise(), 21300);
    /// ```
    pub const fn round_to_rupee(&self) -> Money {
        Money((self.0 + 50).div_euclid(100) * 100)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for logs and debugging. The frontend formats for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
