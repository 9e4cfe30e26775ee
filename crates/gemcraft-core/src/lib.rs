//! # gemcraft-core: Pricing Logic for Gemcraft Jewelry
//!
//! This crate prices customizable jewelry: metal by weight at the live price
//! per gram, gemstones, a making charge, and tax. The price store is an
//! injected capability, so everything here is free of I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Gemcraft Pricing Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Storefront service (out of scope)                │   │
//! │  │        product page ──► quote ──► cart ──► checkout             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PricingInput (JSON)                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ gemcraft-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │  engine   │  │  lookup   │  │   │
//! │  │   │  inputs,  │  │ costs,    │  │ product & │  │ PriceLook │  │   │
//! │  │   │  quotes   │  │ tax, round│  │ variant   │  │ up trait  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  └───────────────────────────────────────────────────────┼─────────┘   │
//! │                                                          │              │
//! │  ┌───────────────────────────────────────────────────────▼─────────┐   │
//! │  │                gemcraft-db (metal price sheet)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, variant and line item inputs; quote outputs
//! - [`pricing`] - Pure cost, tax and rounding arithmetic
//! - [`lookup`] - The [`PriceLookup`] capability and an in-memory table
//! - [`engine`] - [`PricingEngine`]: `compute_product_price`, `compute_variant_price`
//! - [`validation`] - Price sheet input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gemcraft_core::pricing::{CostComponents, Totals};
//! use gemcraft_core::types::TaxRate;
//!
//! let components = CostComponents {
//!     metal_costs: 1600.0,
//!     gemstone_costs: 0.0,
//!     making_charges: 300.0,
//! };
//! let totals = Totals::from_subtotal(components.subtotal(), TaxRate::from_percent(5.0));
//!
//! assert_eq!(totals.tax, 95.0);
//! assert_eq!(totals.rounded_total, 1995);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod lookup;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::PricingEngine;
pub use error::{PriceLookupError, ValidationError};
pub use lookup::{PriceLookup, PriceTable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax percentage applied when a quote does not supply a numeric one.
pub const DEFAULT_TAX_PERCENT: f64 = 3.0;

/// Longest metal name accepted into the price sheet.
pub const MAX_METAL_NAME_LEN: usize = 50;

/// Longest purity designation accepted into the price sheet.
pub const MAX_PURITY_LEN: usize = 20;
