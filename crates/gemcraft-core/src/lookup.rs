//! # Metal Price Lookup
//!
//! The capability the pricing engine uses to resolve a price per gram.
//!
//! ## Injection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   PricingEngine<L: PriceLookup>                                        │
//! │          │                                                              │
//! │          │ find_price_per_gram("Gold", "18k")                          │
//! │          ▼                                                              │
//! │   ┌──────────────────────┐        ┌──────────────────────────────┐     │
//! │   │ PriceTable           │   or   │ MetalPriceRepository         │     │
//! │   │ (in memory, tests)   │        │ (gemcraft-db, SQLite)        │     │
//! │   └──────────────────────┘        └──────────────────────────────┘     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations report what the store said: a price, no record, or a
//! failure. Turning that into a plain number is the engine's job.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PriceLookupError;

/// Resolves the current price per gram for an exact `(metal, purity)` pair.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    /// Queries the store.
    ///
    /// ## Returns
    /// * `Ok(Some(price))` - a record matched
    /// * `Ok(None)` - no record for this pair
    /// * `Err(_)` - the store could not answer
    async fn find_price_per_gram(
        &self,
        metal: &str,
        purity: &str,
    ) -> Result<Option<f64>, PriceLookupError>;
}

#[async_trait]
impl<L: PriceLookup + ?Sized> PriceLookup for Arc<L> {
    async fn find_price_per_gram(
        &self,
        metal: &str,
        purity: &str,
    ) -> Result<Option<f64>, PriceLookupError> {
        (**self).find_price_per_gram(metal, purity).await
    }
}

#[async_trait]
impl<L: PriceLookup + ?Sized> PriceLookup for &L {
    async fn find_price_per_gram(
        &self,
        metal: &str,
        purity: &str,
    ) -> Result<Option<f64>, PriceLookupError> {
        (**self).find_price_per_gram(metal, purity).await
    }
}

// =============================================================================
// In-Memory Price Table
// =============================================================================

/// A fixed price sheet held in memory.
///
/// ## Example
/// ```rust
/// use gemcraft_core::lookup::PriceTable;
///
/// let table = PriceTable::new()
///     .with_price("Gold", "18k", 4000.0)
///     .with_price("Silver", "925", 80.0);
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<(String, String), f64>,
}

impl PriceTable {
    pub fn new() -> Self {
        PriceTable::default()
    }

    /// Adds or replaces a price, builder style.
    pub fn with_price(mut self, metal: impl Into<String>, purity: impl Into<String>, price_per_gram: f64) -> Self {
        self.insert(metal, purity, price_per_gram);
        self
    }

    /// Adds or replaces a price.
    pub fn insert(&mut self, metal: impl Into<String>, purity: impl Into<String>, price_per_gram: f64) {
        self.prices.insert((metal.into(), purity.into()), price_per_gram);
    }

    pub fn get(&self, metal: &str, purity: &str) -> Option<f64> {
        self.prices
            .get(&(metal.to_string(), purity.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl PriceLookup for PriceTable {
    async fn find_price_per_gram(
        &self,
        metal: &str,
        purity: &str,
    ) -> Result<Option<f64>, PriceLookupError> {
        Ok(self.get(metal, purity))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
