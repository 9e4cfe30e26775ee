//! # Pricing Math
//!
//! Pure arithmetic behind every price quote.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      How a Breakdown Is Built                           │
//! │                                                                         │
//! │  metal lines ──► Σ weight × pricePerGram ──► metalCosts ─────┐         │
//! │                                                               │         │
//! │  gemstones ────► Σ price × count ─────────► gemstoneCosts ───┼──► +    │
//! │                                                               │    │    │
//! │  making price ────────────────────────────► makingCharges ───┘    │    │
//! │                                                                    ▼    │
//! │                                                              subtotal   │
//! │                                                                    │    │
//! │                                   tax = subtotal × pct / 100 ◄────┤    │
//! │                                                                    ▼    │
//! │                                           total = subtotal + tax        │
//! │                                                                    │    │
//! │                                   roundedTotal = round(total) ◄───┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Floating Point
//! Quotes are displayed, not booked, so the components stay `f64` with no
//! intermediate rounding. Only `roundedTotal` is rounded, half away from
//! zero.
//!
//! ```rust
//! use gemcraft_core::pricing::{CostComponents, Totals};
//! use gemcraft_core::types::TaxRate;
//!
//! let components = CostComponents {
//!     metal_costs: 40000.0,
//!     gemstone_costs: 1000.0,
//!     making_charges: 1000.0,
//! };
//! let totals = Totals::from_subtotal(components.subtotal(), TaxRate::default());
//!
//! assert_eq!(totals.tax, 1260.0);
//! assert_eq!(totals.rounded_total, 43260);
//! ```

use crate::types::{GemstoneLineItem, TaxRate};

// =============================================================================
// Line Costs
// =============================================================================

/// Cost of one metal line: grams times the price per gram.
#[inline]
pub fn metal_line_cost(weight: f64, price_per_gram: f64) -> f64 {
    weight * price_per_gram
}

/// Total gemstone cost: `Σ price × count`, summed in list order.
///
/// An empty list costs nothing.
pub fn gemstone_costs(gemstones: &[GemstoneLineItem]) -> f64 {
    gemstones
        .iter()
        .fold(0.0, |sum, gem| sum + gem.price * gem.count)
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to the nearest whole currency unit, ties away from zero.
///
/// ```rust
/// use gemcraft_core::pricing::round_half_away_from_zero;
///
/// assert_eq!(round_half_away_from_zero(2.5), 3);
/// assert_eq!(round_half_away_from_zero(2.4999), 2);
/// assert_eq!(round_half_away_from_zero(-2.5), -3);
/// ```
#[inline]
pub fn round_half_away_from_zero(value: f64) -> i64 {
    value.round() as i64
}

// =============================================================================
// Cost Components
// =============================================================================

/// The three cost terms that make up a subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostComponents {
    pub metal_costs: f64,
    pub gemstone_costs: f64,
    pub making_charges: f64,
}

impl CostComponents {
    /// `metalCosts + gemstoneCosts + makingCharges`, left to right.
    #[inline]
    pub fn subtotal(&self) -> f64 {
        self.metal_costs + self.gemstone_costs + self.making_charges
    }

    /// Applies tax and rounding to the subtotal.
    pub fn totals(&self, rate: TaxRate) -> Totals {
        Totals::from_subtotal(self.subtotal(), rate)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Subtotal, tax and total for one quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub rounded_total: i64,
}

impl Totals {
    /// Derives tax, total and the display total from a subtotal.
    pub fn from_subtotal(subtotal: f64, rate: TaxRate) -> Self {
        let tax = rate.apply(subtotal);
        let total = subtotal + tax;

        Totals {
            subtotal,
            tax,
            total,
            rounded_total: round_half_away_from_zero(total),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metal_line_cost() {
        assert_eq!(metal_line_cost(10.0, 4000.0), 40000.0);
        assert_eq!(metal_line_cost(0.0, 4000.0), 0.0);
        assert_eq!(metal_line_cost(2.5, 0.0), 0.0);
    }

    #[test]
    fn test_gemstone_costs() {
        let gems = vec![
            GemstoneLineItem::new(500.0, 2.0),
            GemstoneLineItem::new(120.0, 5.0),
        ];
        assert_eq!(gemstone_costs(&gems), 1600.0);
        assert_eq!(gemstone_costs(&[]), 0.0);
    }

    #[test]
    fn test_gemstone_costs_order_independent() {
        let forward = vec![
            GemstoneLineItem::new(100.0, 3.0),
            GemstoneLineItem::new(250.0, 1.0),
            GemstoneLineItem::new(75.0, 4.0),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(gemstone_costs(&forward), gemstone_costs(&reversed));
    }

    #[test]
    fn test_rounding_ties_away_from_zero() {
        assert_eq!(round_half_away_from_zero(0.5), 1);
        assert_eq!(round_half_away_from_zero(1.5), 2);
        assert_eq!(round_half_away_from_zero(2.5), 3);
        assert_eq!(round_half_away_from_zero(1994.49), 1994);
        assert_eq!(round_half_away_from_zero(-0.5), -1);
    }

    #[test]
    fn test_totals_keep_full_precision() {
        let totals = Totals::from_subtotal(1000.5, TaxRate::from_percent(3.0));

        assert_eq!(totals.subtotal, 1000.5);
        assert_eq!(totals.tax, 1000.5 * 3.0 / 100.0);
        assert_eq!(totals.total, 1000.5 + 1000.5 * 3.0 / 100.0);
        assert_eq!(totals.rounded_total, 1031);
    }

    #[test]
    fn test_components_subtotal() {
        let components = CostComponents {
            metal_costs: 5000.0,
            gemstone_costs: 100.0,
            making_charges: 200.0,
        };
        assert_eq!(components.subtotal(), 5300.0);

        let totals = components.totals(TaxRate::from_percent(0.0));
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.rounded_total, 5300);
    }
}
