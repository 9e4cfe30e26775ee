//! # Pricing Engine
//!
//! Produces price quotes for jewelry products and variants from live metal
//! prices.
//!
//! ## Entry Points
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  compute_product_price(product)          compute_variant_price(variant) │
//! │  ──────────────────────────────          ────────────────────────────── │
//! │  gemstones priced ONCE                   no gemstone term, ever         │
//! │       │                                        │                        │
//! │       ├── variants? ──► one breakdown          ▼                        │
//! │       │                 per variant       metal + making                │
//! │       │                                        │                        │
//! │       └── otherwise ──► one breakdown          ▼                        │
//! │                         tagged with       VariantPriceBreakdown         │
//! │                         product id/name                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<PriceBreakdown>                                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two operations serve different callers and differ on purpose:
//! `compute_variant_price` leaves gemstones out even when the variant
//! carries them. Callers that need gemstones use `compute_product_price`.
//!
//! ## Always Succeeds
//! Neither operation can fail. Missing data prices at zero, and a price
//! store failure is logged and priced at zero for that metal line.

use tracing::{debug, warn};

use crate::lookup::PriceLookup;
use crate::pricing::{gemstone_costs, metal_line_cost, CostComponents};
use crate::types::{
    MetalLineItem, PriceBreakdown, PriceQuote, PriceQuoteOptions, PricingInput, Variant,
    VariantPriceBreakdown,
};

/// Quotes products against an injected metal price store.
///
/// ## Usage
/// ```rust
/// use gemcraft_core::engine::PricingEngine;
/// use gemcraft_core::lookup::PriceTable;
/// use gemcraft_core::types::{MetalLineItem, PriceQuoteOptions, Variant};
///
/// # tokio_test_block(async {
/// let engine = PricingEngine::new(PriceTable::new().with_price("Silver", "925", 80.0));
/// let variant = Variant {
///     metal: vec![MetalLineItem::new("Silver", "925", 20.0)],
///     making_price: 300.0,
///     ..Variant::default()
/// };
///
/// let quote = engine
///     .compute_variant_price(&variant, &PriceQuoteOptions::with_tax_percent(5.0))
///     .await;
/// assert_eq!(quote.data.rounded_total, 1995);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PricingEngine<L> {
    lookup: L,
}

impl<L: PriceLookup> PricingEngine<L> {
    pub fn new(lookup: L) -> Self {
        PricingEngine { lookup }
    }

    /// Returns the injected price store.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Quotes a product: one breakdown per variant, or a single breakdown
    /// when the product has no variants.
    ///
    /// Gemstone cost is computed once and shared by every variant.
    pub async fn compute_product_price(
        &self,
        product: &PricingInput,
        options: &PriceQuoteOptions,
    ) -> PriceQuote<Vec<PriceBreakdown>> {
        let rate = options.tax_rate();
        let gemstone_costs = gemstone_costs(&product.gemstones);

        let mut breakdowns = Vec::with_capacity(product.variants.len().max(1));

        if product.has_variants() {
            for variant in &product.variants {
                let components = CostComponents {
                    metal_costs: self.metal_costs(&variant.metal).await,
                    gemstone_costs,
                    making_charges: variant.making_price,
                };
                breakdowns.push(PriceBreakdown::new(
                    variant.variant_id.clone(),
                    variant.name.clone(),
                    components,
                    components.totals(rate),
                ));
            }
        } else {
            let components = CostComponents {
                metal_costs: self.metal_costs(&product.metals).await,
                gemstone_costs,
                making_charges: product.making_price,
            };
            breakdowns.push(PriceBreakdown::new(
                product.id.clone(),
                product.name.clone(),
                components,
                components.totals(rate),
            ));
        }

        debug!(
            product = ?product.id,
            breakdowns = breakdowns.len(),
            tax_percent = rate.percent(),
            "Product priced"
        );

        PriceQuote::ok(breakdowns)
    }

    /// Quotes a single variant on metal and making charge alone.
    pub async fn compute_variant_price(
        &self,
        variant: &Variant,
        options: &PriceQuoteOptions,
    ) -> PriceQuote<VariantPriceBreakdown> {
        let components = CostComponents {
            metal_costs: self.metal_costs(&variant.metal).await,
            gemstone_costs: 0.0,
            making_charges: variant.making_price,
        };
        let totals = components.totals(options.tax_rate());

        debug!(
            variant = ?variant.variant_id,
            total = totals.total,
            "Variant priced"
        );

        PriceQuote::ok(VariantPriceBreakdown {
            metal_costs: components.metal_costs,
            making_charges: components.making_charges,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            rounded_total: totals.rounded_total,
        })
    }

    /// Resolves the price per gram, coercing every failure to zero.
    ///
    /// ```text
    /// metal empty       → 0 (store not queried)
    /// Ok(Some(price))   → price
    /// Ok(None)          → 0
    /// Err(e)            → 0, logged at WARN
    /// ```
    pub async fn price_per_gram(&self, metal: &str, purity: &str) -> f64 {
        if metal.is_empty() {
            return 0.0;
        }

        match self.lookup.find_price_per_gram(metal, purity).await {
            Ok(Some(price)) => price,
            Ok(None) => {
                debug!(metal, purity, "No metal price on file");
                0.0
            }
            Err(e) => {
                warn!(metal, purity, error = %e, "Metal price lookup failed, pricing at zero");
                0.0
            }
        }
    }

    /// Sums `weight × pricePerGram` over the lines, one lookup at a time in
    /// line order.
    async fn metal_costs(&self, metals: &[MetalLineItem]) -> f64 {
        let mut total = 0.0;
        for line in metals {
            let price = self.price_per_gram(&line.metal_type, &line.purity).await;
            total += metal_line_cost(line.weight, price);
        }
        total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PriceLookupError;
    use crate::lookup::PriceTable;
    use crate::types::GemstoneLineItem;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A store that is always down.
    struct BrokenStore;

    #[async_trait]
    impl PriceLookup for BrokenStore {
        async fn find_price_per_gram(
            &self,
            _metal: &str,
            _purity: &str,
        ) -> Result<Option<f64>, PriceLookupError> {
            Err(PriceLookupError::Unavailable("connection refused".to_string()))
        }
    }

    /// Counts queries and fails only for Platinum.
    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceLookup for CountingStore {
        async fn find_price_per_gram(
            &self,
            metal: &str,
            _purity: &str,
        ) -> Result<Option<f64>, PriceLookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match metal {
                "Platinum" => Err(PriceLookupError::Unavailable("timeout".to_string())),
                _ => Ok(Some(100.0)),
            }
        }
    }

    fn sheet() -> PriceTable {
        PriceTable::new()
            .with_price("Gold", "18k", 4000.0)
            .with_price("Gold", "22k", 5000.0)
            .with_price("Silver", "925", 80.0)
            .with_price("Generic", "std", 1000.0)
    }

    #[tokio::test]
    async fn test_product_without_variants() {
        let engine = PricingEngine::new(sheet());
        let product = PricingInput {
            id: Some("ring-1".to_string()),
            name: Some("Solitaire".to_string()),
            metals: vec![MetalLineItem::new("Gold", "18k", 10.0)],
            gemstones: vec![GemstoneLineItem::new(500.0, 2.0)],
            making_price: 1000.0,
            variants: vec![],
        };

        let quote = engine
            .compute_product_price(&product, &PriceQuoteOptions::default())
            .await;

        assert!(quote.success);
        assert_eq!(quote.data.len(), 1);

        let b = &quote.data[0];
        assert_eq!(b.variant_id.as_deref(), Some("ring-1"));
        assert_eq!(b.variant_name.as_deref(), Some("Solitaire"));
        assert_eq!(b.metal_costs, 40000.0);
        assert_eq!(b.gemstone_costs, 1000.0);
        assert_eq!(b.making_charges, 1000.0);
        assert_eq!(b.subtotal, 42000.0);
        assert_eq!(b.tax, 1260.0);
        assert_eq!(b.total, 43260.0);
        assert_eq!(b.rounded_total, 43260);
    }

    #[tokio::test]
    async fn test_variants_share_gemstone_cost() {
        let engine = PricingEngine::new(sheet());
        let product: PricingInput = serde_json::from_value(json!({
            "gemstones": [{ "price": 100, "count": 1 }],
            "variants": [
                { "variant_id": "A", "name": "Heavy", "metal": [{ "type": "Generic", "purity": "std", "weight": 5 }], "making_price": 200 },
                { "variant_id": "B", "name": "Light", "metal": [{ "type": "Generic", "purity": "std", "weight": 2 }], "making_price": 50 }
            ]
        }))
        .unwrap();

        let quote = engine
            .compute_product_price(&product, &PriceQuoteOptions::default())
            .await;

        assert_eq!(quote.data.len(), 2);

        let (a, b) = (&quote.data[0], &quote.data[1]);
        assert_eq!(a.variant_id.as_deref(), Some("A"));
        assert_eq!(a.variant_name.as_deref(), Some("Heavy"));
        assert_eq!(a.metal_costs, 5000.0);
        assert_eq!(a.subtotal, 5300.0);

        assert_eq!(b.variant_id.as_deref(), Some("B"));
        assert_eq!(b.metal_costs, 2000.0);
        assert_eq!(b.subtotal, 2150.0);

        assert_eq!(a.gemstone_costs, 100.0);
        assert_eq!(a.gemstone_costs, b.gemstone_costs);
    }

    #[tokio::test]
    async fn test_variants_take_precedence_over_product_metals() {
        let engine = PricingEngine::new(sheet());
        let product = PricingInput {
            metals: vec![MetalLineItem::new("Gold", "22k", 100.0)],
            making_price: 9999.0,
            variants: vec![Variant {
                variant_id: Some("v1".to_string()),
                metal: vec![MetalLineItem::new("Silver", "925", 1.0)],
                ..Variant::default()
            }],
            ..PricingInput::default()
        };

        let quote = engine
            .compute_product_price(&product, &PriceQuoteOptions::with_tax_percent(0.0))
            .await;

        assert_eq!(quote.data.len(), 1);
        assert_eq!(quote.data[0].metal_costs, 80.0);
        assert_eq!(quote.data[0].making_charges, 0.0);
        assert_eq!(quote.data[0].rounded_total, 80);
    }

    #[tokio::test]
    async fn test_variant_price_scenario() {
        let engine = PricingEngine::new(sheet());
        let variant: Variant = serde_json::from_value(json!({
            "metal": [{ "Type": "Silver", "purity": "925", "weight": 20 }],
            "making_price": 300
        }))
        .unwrap();

        let quote = engine
            .compute_variant_price(&variant, &PriceQuoteOptions::with_tax_percent(5.0))
            .await;

        assert!(quote.success);
        assert_eq!(quote.data.metal_costs, 1600.0);
        assert_eq!(quote.data.making_charges, 300.0);
        assert_eq!(quote.data.subtotal, 1900.0);
        assert_eq!(quote.data.tax, 95.0);
        assert_eq!(quote.data.total, 1995.0);
        assert_eq!(quote.data.rounded_total, 1995);
    }

    #[tokio::test]
    async fn test_mixed_metals_price_each_line() {
        let engine = PricingEngine::new(sheet());
        let lines = vec![
            MetalLineItem::new("Gold", "18k", 2.0),
            MetalLineItem::new("Silver", "925", 3.0),
            MetalLineItem::new("Gold", "22k", 1.0),
        ];
        let mut reversed = lines.clone();
        reversed.reverse();

        let forward = Variant {
            metal: lines,
            ..Variant::default()
        };
        let backward = Variant {
            metal: reversed,
            ..Variant::default()
        };
        let options = PriceQuoteOptions::with_tax_percent(0.0);

        let a = engine.compute_variant_price(&forward, &options).await;
        let b = engine.compute_variant_price(&backward, &options).await;

        // 2 × 4000 + 3 × 80 + 1 × 5000
        assert_eq!(a.data.metal_costs, 13240.0);
        assert_eq!(b.data.metal_costs, a.data.metal_costs);
        assert_eq!(b.data.rounded_total, 13240);

        let product = PricingInput {
            metals: forward.metal.clone(),
            ..PricingInput::default()
        };
        let quote = engine.compute_product_price(&product, &options).await;
        assert_eq!(quote.data[0].metal_costs, 13240.0);
    }

    #[tokio::test]
    async fn test_variant_price_ignores_gemstones() {
        let engine = PricingEngine::new(sheet());
        let variant: Variant = serde_json::from_value(json!({
            "metal": [{ "type": "Gold", "purity": "18k", "weight": 1 }],
            "making_price": 0,
            "gemstones": [{ "price": 10000, "count": 3 }]
        }))
        .unwrap();

        let quote = engine
            .compute_variant_price(&variant, &PriceQuoteOptions::with_tax_percent(0.0))
            .await;

        assert_eq!(quote.data.subtotal, 4000.0);
    }

    #[tokio::test]
    async fn test_store_failure_prices_at_zero() {
        let engine = PricingEngine::new(BrokenStore);
        let product = PricingInput {
            metals: vec![MetalLineItem::new("Gold", "18k", 10.0)],
            gemstones: vec![GemstoneLineItem::new(500.0, 2.0)],
            making_price: 1000.0,
            ..PricingInput::default()
        };

        let quote = engine
            .compute_product_price(&product, &PriceQuoteOptions::default())
            .await;

        assert!(quote.success);
        assert_eq!(quote.data[0].metal_costs, 0.0);
        assert_eq!(quote.data[0].subtotal, 2000.0);
        assert_eq!(quote.data[0].rounded_total, 2060);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_lines() {
        let store = CountingStore::default();
        let engine = PricingEngine::new(&store);
        let variant = Variant {
            metal: vec![
                MetalLineItem::new("Gold", "18k", 2.0),
                MetalLineItem::new("Platinum", "950", 50.0),
                MetalLineItem::new("Silver", "925", 3.0),
            ],
            ..Variant::default()
        };

        let quote = engine
            .compute_variant_price(&variant, &PriceQuoteOptions::default())
            .await;

        assert_eq!(quote.data.metal_costs, 500.0);
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_metal_type_skips_store() {
        let store = CountingStore::default();
        let engine = PricingEngine::new(&store);

        assert_eq!(engine.price_per_gram("", "18k").await, 0.0);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_metal_prices_at_zero() {
        let engine = PricingEngine::new(sheet());

        assert_eq!(engine.price_per_gram("Palladium", "950").await, 0.0);
        assert_eq!(engine.price_per_gram("Gold", "18k").await, 4000.0);
    }

    #[tokio::test]
    async fn test_malformed_input_still_quotes() {
        let engine = PricingEngine::new(sheet());
        let product: PricingInput = serde_json::from_value(json!({
            "name": "Bare band",
            "gemstones": "n/a",
            "variants": []
        }))
        .unwrap();
        let options: PriceQuoteOptions =
            serde_json::from_value(json!({ "taxPercent": "ten" })).unwrap();

        let quote = engine.compute_product_price(&product, &options).await;

        assert!(quote.success);
        assert_eq!(quote.data.len(), 1);
        assert_eq!(quote.data[0].variant_id, None);
        assert_eq!(quote.data[0].variant_name.as_deref(), Some("Bare band"));
        assert_eq!(quote.data[0].subtotal, 0.0);
        assert_eq!(quote.data[0].rounded_total, 0);
    }

    #[tokio::test]
    async fn test_tax_rounding_on_fractional_total() {
        let engine = PricingEngine::new(sheet());
        let variant = Variant {
            metal: vec![MetalLineItem::new("Silver", "925", 0.5)],
            making_price: 10.5,
            ..Variant::default()
        };

        let quote = engine
            .compute_variant_price(&variant, &PriceQuoteOptions::with_tax_percent(10.0))
            .await;

        // 40 + 10.5 = 50.5, tax 5.05, total 55.55
        assert_eq!(quote.data.subtotal, 50.5);
        assert!((quote.data.total - 55.55).abs() < 1e-9);
        assert_eq!(quote.data.rounded_total, 56);
    }
}
