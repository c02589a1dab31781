//! # Checkout Computation
//!
//! The pure arithmetic core of a sale: line pricing, discount, GST
//! split, rupee-rounded grand total, and profit. No I/O here; the
//! transactional side (stock decrements, invoice numbering, inserts)
//! lives in saral-db and feeds resolved product data in here.
//!
//! ## Computation Pipeline
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  PricedLine[]  (product snapshot × requested quantity)        │
//! │       │                                                       │
//! │       ▼                                                       │
//! │  subtotal   = Σ unit_price × qty                              │
//! │  total_cost = Σ cost_price × qty                              │
//! │       │                                                       │
//! │       ▼                                                       │
//! │  discount       = subtotal × discount_rate                    │
//! │  after_discount = subtotal − discount                         │
//! │       │                                                       │
//! │       ├── IntraState: cgst = sgst = after_discount × 9%       │
//! │       └── InterState: igst = after_discount × 18%             │
//! │       │                                                       │
//! │       ▼                                                       │
//! │  grand_total = round_to_rupee(after_discount + gst)           │
//! │  profit      = subtotal − total_cost − discount               │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tax applies after the discount; the profit figure is net of the
//! discount but pre-tax (GST is collected for the state, not earned).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Rate, TaxJurisdiction};

// =============================================================================
// GST Rates
// =============================================================================

/// Central GST component for intra-state sales: 9%.
pub const CGST_RATE: Rate = Rate::from_bps(900);

/// State GST component for intra-state sales: 9%.
pub const SGST_RATE: Rate = Rate::from_bps(900);

/// Integrated GST for inter-state sales: 18%.
pub const IGST_RATE: Rate = Rate::from_bps(1800);

// =============================================================================
// Priced Line
// =============================================================================

/// A cart line joined with its product snapshot: everything checkout
/// needs to price the line and freeze it onto the bill.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricedLine {
    pub product_id: String,
    pub name: String,
    pub hsn_code: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub cost_price: Money,
}

impl PricedLine {
    /// unit price × quantity.
    #[inline]
    pub fn line_subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// cost price × quantity.
    #[inline]
    pub fn line_cost(&self) -> Money {
        self.cost_price.multiply_quantity(self.quantity)
    }

    /// line subtotal − line cost (pre-discount).
    #[inline]
    pub fn line_profit(&self) -> Money {
        self.line_subtotal() - self.line_cost()
    }
}

// =============================================================================
// Checkout Totals
// =============================================================================

/// Every figure persisted on a bill header, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutTotals {
    pub subtotal: Money,
    pub total_cost: Money,
    pub discount_rate: Rate,
    pub discount: Money,
    pub after_discount: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    pub gst: Money,
    /// Whole-rupee amount.
    pub grand_total: Money,
    /// subtotal − total cost − discount. Pre-tax.
    pub total_profit: Money,
}

/// Computes all bill figures for a priced cart.
///
/// ## Example
/// ```rust
/// use saral_core::checkout::{compute_totals, PricedLine};
/// use saral_core::money::Money;
/// use saral_core::types::{Rate, TaxJurisdiction};
///
/// // 2 × ₹100 (cost ₹60), 10% discount, intra-state
/// let lines = vec![PricedLine {
///     product_id: "p1".into(),
///     name: "LED Bulb".into(),
///     hsn_code: "9405".into(),
///     quantity: 2,
///     unit_price: Money::from_rupees(100),
///     cost_price: Money::from_rupees(60),
/// }];
/// let totals = compute_totals(&lines, Rate::from_percentage(10.0), TaxJurisdiction::IntraState);
/// assert_eq!(totals.grand_total.paise(), 21200); // ₹212
/// ```
pub fn compute_totals(
    lines: &[PricedLine],
    discount_rate: Rate,
    jurisdiction: TaxJurisdiction,
) -> CheckoutTotals {
    let mut subtotal = Money::zero();
    let mut total_cost = Money::zero();
    for line in lines {
        subtotal += line.line_subtotal();
        total_cost += line.line_cost();
    }

    let discount = subtotal.portion(discount_rate);
    let after_discount = subtotal - discount;

    let (cgst, sgst, igst) = match jurisdiction {
        TaxJurisdiction::IntraState => (
            after_discount.portion(CGST_RATE),
            after_discount.portion(SGST_RATE),
            Money::zero(),
        ),
        TaxJurisdiction::InterState => (
            Money::zero(),
            Money::zero(),
            after_discount.portion(IGST_RATE),
        ),
    };
    let gst = cgst + sgst + igst;

    let grand_total = (after_discount + gst).round_to_rupee();
    let total_profit = subtotal - total_cost - discount;

    CheckoutTotals {
        subtotal,
        total_cost,
        discount_rate,
        discount,
        after_discount,
        cgst,
        sgst,
        igst,
        gst,
        grand_total,
        total_profit,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i64, price_paise: i64, cost_paise: i64) -> PricedLine {
        PricedLine {
            product_id: "p1".to_string(),
            name: "Test Product".to_string(),
            hsn_code: "9999".to_string(),
            quantity: qty,
            unit_price: Money::from_paise(price_paise),
            cost_price: Money::from_paise(cost_paise),
        }
    }

    #[test]
    fn test_intra_state_worked_example() {
        // 2 × ₹100 (cost ₹60), 10% discount, same state
        let totals = compute_totals(
            &[line(2, 10000, 6000)],
            Rate::from_percentage(10.0),
            TaxJurisdiction::IntraState,
        );

        assert_eq!(totals.subtotal.paise(), 20000);
        assert_eq!(totals.discount.paise(), 2000);
        assert_eq!(totals.after_discount.paise(), 18000);
        assert_eq!(totals.cgst.paise(), 1620);
        assert_eq!(totals.sgst.paise(), 1620);
        assert_eq!(totals.igst.paise(), 0);
        assert_eq!(totals.gst.paise(), 3240);
        // round(180.00 + 32.40) = ₹212
        assert_eq!(totals.grand_total.paise(), 21200);
        // 200 − 120 − 20 = ₹60
        assert_eq!(totals.total_profit.paise(), 6000);
    }

    #[test]
    fn test_inter_state_same_total_different_split() {
        let totals = compute_totals(
            &[line(2, 10000, 6000)],
            Rate::from_percentage(10.0),
            TaxJurisdiction::InterState,
        );

        assert_eq!(totals.cgst.paise(), 0);
        assert_eq!(totals.sgst.paise(), 0);
        assert_eq!(totals.igst.paise(), 3240);
        assert_eq!(totals.gst.paise(), 3240);
        assert_eq!(totals.grand_total.paise(), 21200);
    }

    #[test]
    fn test_no_discount() {
        let totals = compute_totals(&[line(1, 10000, 0)], Rate::zero(), TaxJurisdiction::IntraState);

        assert_eq!(totals.discount.paise(), 0);
        assert_eq!(totals.after_discount.paise(), 10000);
        assert_eq!(totals.cgst.paise(), 900);
        assert_eq!(totals.sgst.paise(), 900);
        // round(100 + 18) = ₹118
        assert_eq!(totals.grand_total.paise(), 11800);
        // Cost defaulted to zero: the whole subtotal is profit
        assert_eq!(totals.total_profit.paise(), 10000);
    }

    #[test]
    fn test_subtotal_is_sum_of_line_subtotals() {
        let lines = vec![line(2, 10000, 6000), line(3, 4550, 3000), line(1, 99, 50)];
        let totals = compute_totals(&lines, Rate::from_percentage(5.0), TaxJurisdiction::InterState);

        let sum: i64 = lines.iter().map(|l| l.line_subtotal().paise()).sum();
        assert_eq!(totals.subtotal.paise(), sum);
    }

    #[test]
    fn test_grand_total_is_whole_rupees() {
        // Awkward amounts that force rounding at every step
        let lines = vec![line(3, 3333, 1111), line(7, 101, 67)];
        let totals = compute_totals(
            &lines,
            Rate::from_percentage(7.5),
            TaxJurisdiction::IntraState,
        );

        assert_eq!(totals.grand_total.paise() % 100, 0);
        assert!(!totals.grand_total.is_negative());
        assert_eq!(
            totals.grand_total,
            (totals.after_discount + totals.gst).round_to_rupee()
        );
    }

    #[test]
    fn test_empty_line_slice_is_all_zero() {
        // The engine rejects empty carts before computing; the pure
        // function itself degrades to zeroes.
        let totals = compute_totals(&[], Rate::from_percentage(10.0), TaxJurisdiction::IntraState);
        assert_eq!(totals.subtotal, Money::zero());
        assert_eq!(totals.grand_total, Money::zero());
    }

    #[test]
    fn test_line_profit() {
        let l = line(4, 2500, 1500);
        assert_eq!(l.line_subtotal().paise(), 10000);
        assert_eq!(l.line_cost().paise(), 6000);
        assert_eq!(l.line_profit().paise(), 4000);
    }
}
