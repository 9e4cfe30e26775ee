//! # Domain Types
//!
//! Core domain types used by the Gemcraft pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (request-scoped, built from a product document)                 │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PricingInput   │   │    Variant      │   │  MetalLineItem  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name       │──►│  variant_id     │──►│  type / Type    │       │
//! │  │  metals[]       │   │  name           │   │  purity         │       │
//! │  │  gemstones[]    │   │  metal[]        │   │  weight (g)     │       │
//! │  │  makingPrice    │   │  making_price   │   └─────────────────┘       │
//! │  │  variants[]     │   └─────────────────┘   ┌─────────────────┐       │
//! │  └─────────────────┘                         │GemstoneLineItem │       │
//! │                                              │  price × count  │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  OUTPUT                                                                 │
//! │  PriceQuote<Vec<PriceBreakdown>>   PriceQuote<VariantPriceBreakdown>   │
//! │                                                                         │
//! │  STORED (owned by gemcraft-db)                                          │
//! │  MetalPrice { metal, purity, pricePerGram }                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Input
//! Product documents come from a schemaless store. Deserialization never
//! fails on a well-formed JSON object:
//! - absent, null or non-numeric numbers become `0`
//! - absent or non-array lists become empty
//! - `type` and `Type` both name the metal type
//! - `id` and the store key `_id` both name the product

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;
use ts_rs::TS;

use crate::pricing::{CostComponents, Totals};
use crate::DEFAULT_TAX_PERCENT;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a percentage (3.0 = 3%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    #[inline]
    pub const fn from_percent(percent: f64) -> Self {
        TaxRate(percent)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> f64 {
        self.0
    }

    /// Tax owed on `subtotal`, unrounded.
    #[inline]
    pub fn apply(&self, subtotal: f64) -> f64 {
        subtotal * self.0 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(DEFAULT_TAX_PERCENT)
    }
}

// =============================================================================
// Quote Options
// =============================================================================

/// Options for a price quote.
///
/// `taxPercent` counts only when it is a JSON number. A string, `null` or a
/// missing key all fall back to [`DEFAULT_TAX_PERCENT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceQuoteOptions {
    #[serde(
        rename = "taxPercent",
        default,
        deserialize_with = "strict_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_percent: Option<f64>,
}

impl PriceQuoteOptions {
    /// Options with an explicit tax percentage.
    pub fn with_tax_percent(percent: f64) -> Self {
        PriceQuoteOptions {
            tax_percent: Some(percent),
        }
    }

    /// Resolves the effective tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_percent
            .map(TaxRate::from_percent)
            .unwrap_or_default()
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// One metal component of a product or variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMetalLineItem")]
pub struct MetalLineItem {
    /// Metal type ("Gold", "Silver", "Platinum", ...).
    #[serde(rename = "type")]
    pub metal_type: String,

    /// Karat or fineness ("18k", "925").
    pub purity: String,

    /// Weight in grams.
    pub weight: f64,
}

impl MetalLineItem {
    pub fn new(metal_type: impl Into<String>, purity: impl Into<String>, weight: f64) -> Self {
        MetalLineItem {
            metal_type: metal_type.into(),
            purity: purity.into(),
            weight,
        }
    }
}

/// Wire shape of a metal line item before `type`/`Type` are merged.
#[derive(Deserialize)]
struct RawMetalLineItem {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    lower: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "lenient_string")]
    upper: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    purity: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    weight: f64,
}

impl From<RawMetalLineItem> for MetalLineItem {
    fn from(raw: RawMetalLineItem) -> Self {
        let metal_type = raw
            .lower
            .filter(|t| !t.is_empty())
            .or(raw.upper)
            .unwrap_or_default();

        MetalLineItem {
            metal_type,
            purity: raw.purity.unwrap_or_default(),
            weight: raw.weight,
        }
    }
}

/// A group of identical gemstones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GemstoneLineItem {
    /// Price per stone.
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: f64,

    /// Number of stones.
    #[serde(default, deserialize_with = "lenient_number")]
    pub count: f64,
}

impl GemstoneLineItem {
    pub fn new(price: f64, count: f64) -> Self {
        GemstoneLineItem { price, count }
    }
}

// =============================================================================
// Variant
// =============================================================================

/// An alternate configuration of a product, priced on its own metals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, deserialize_with = "lenient_string")]
    pub variant_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub metal: Vec<MetalLineItem>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub making_price: f64,
}

// =============================================================================
// Pricing Input
// =============================================================================

/// A product as handed to the engine.
///
/// When `variants` is non-empty the product-level `metals` and
/// `makingPrice` are ignored and each variant is priced instead.
/// `gemstones` always belong to the product and are shared by every variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPricingInput")]
pub struct PricingInput {
    pub id: Option<String>,

    pub name: Option<String>,

    pub metals: Vec<MetalLineItem>,

    pub gemstones: Vec<GemstoneLineItem>,

    #[serde(rename = "makingPrice")]
    pub making_price: f64,

    pub variants: Vec<Variant>,
}

/// Wire shape of a product before `id` and the store key `_id` are merged.
#[derive(Deserialize)]
struct RawPricingInput {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "lenient_string")]
    store_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    metals: Vec<MetalLineItem>,
    #[serde(default, deserialize_with = "lenient_list")]
    gemstones: Vec<GemstoneLineItem>,
    #[serde(rename = "makingPrice", default, deserialize_with = "lenient_number")]
    making_price: f64,
    #[serde(default, deserialize_with = "lenient_list")]
    variants: Vec<Variant>,
}

impl From<RawPricingInput> for PricingInput {
    fn from(raw: RawPricingInput) -> Self {
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .or(raw.store_id);

        PricingInput {
            id,
            name: raw.name,
            metals: raw.metals,
            gemstones: raw.gemstones,
            making_price: raw.making_price,
            variants: raw.variants,
        }
    }
}

impl PricingInput {
    /// Returns true when each variant should get its own breakdown.
    #[inline]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

// =============================================================================
// Price Breakdowns
// =============================================================================

/// Full price breakdown for one variant, or for a product without variants.
///
/// Every monetary field except `roundedTotal` is unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    pub variant_id: Option<String>,
    pub variant_name: Option<String>,
    #[serde(rename = "metalCosts")]
    pub metal_costs: f64,
    #[serde(rename = "gemstoneCosts")]
    pub gemstone_costs: f64,
    #[serde(rename = "makingCharges")]
    pub making_charges: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(rename = "roundedTotal")]
    #[ts(type = "number")]
    pub rounded_total: i64,
}

impl PriceBreakdown {
    /// Assembles a tagged breakdown from its cost components.
    pub fn new(
        variant_id: Option<String>,
        variant_name: Option<String>,
        components: CostComponents,
        totals: Totals,
    ) -> Self {
        PriceBreakdown {
            variant_id,
            variant_name,
            metal_costs: components.metal_costs,
            gemstone_costs: components.gemstone_costs,
            making_charges: components.making_charges,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            rounded_total: totals.rounded_total,
        }
    }
}

/// Breakdown for a single variant quoted on its own.
///
/// Carries no gemstone term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantPriceBreakdown {
    #[serde(rename = "metalCosts")]
    pub metal_costs: f64,
    #[serde(rename = "makingCharges")]
    pub making_charges: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(rename = "roundedTotal")]
    #[ts(type = "number")]
    pub rounded_total: i64,
}

/// Envelope returned by both engine operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceQuote<T> {
    pub success: bool,
    pub data: T,
}

impl<T> PriceQuote<T> {
    /// A successful quote. The engine has no other kind.
    pub fn ok(data: T) -> Self {
        PriceQuote {
            success: true,
            data,
        }
    }
}

// =============================================================================
// Metal Price Record
// =============================================================================

/// A row of the price sheet: current price per gram for a metal and purity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MetalPrice {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub metal: String,

    pub purity: String,

    pub price_per_gram: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Lenient Deserializers
// =============================================================================

fn number_or_zero(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => {
                debug!(raw = %s, "Non-numeric value read as 0");
                0.0
            }
        },
        _ => 0.0,
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_or_zero(&value))
}

fn strict_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tax_rate_default_is_three_percent() {
        let rate = TaxRate::default();
        assert_eq!(rate.percent(), 3.0);
        assert_eq!(rate.apply(42000.0), 1260.0);
    }

    #[test]
    fn test_options_accept_only_numbers() {
        let opts: PriceQuoteOptions = serde_json::from_value(json!({ "taxPercent": 5 })).unwrap();
        assert_eq!(opts.tax_rate().percent(), 5.0);

        for raw in [json!({}), json!({ "taxPercent": "5" }), json!({ "taxPercent": null })] {
            let opts: PriceQuoteOptions = serde_json::from_value(raw).unwrap();
            assert_eq!(opts.tax_percent, None);
            assert_eq!(opts.tax_rate().percent(), 3.0);
        }
    }

    #[test]
    fn test_metal_type_accepts_either_casing() {
        let lower: MetalLineItem =
            serde_json::from_value(json!({ "type": "Gold", "purity": "18k", "weight": 10 })).unwrap();
        let upper: MetalLineItem =
            serde_json::from_value(json!({ "Type": "Silver", "purity": "925", "weight": 20 })).unwrap();

        assert_eq!(lower.metal_type, "Gold");
        assert_eq!(upper.metal_type, "Silver");
        assert_eq!(upper.weight, 20.0);

        let both: MetalLineItem =
            serde_json::from_value(json!({ "type": "", "Type": "Platinum" })).unwrap();
        assert_eq!(both.metal_type, "Platinum");
    }

    #[test]
    fn test_metal_line_item_serializes_canonical_field() {
        let item = MetalLineItem::new("Gold", "22k", 4.5);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({ "type": "Gold", "purity": "22k", "weight": 4.5 }));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let gem: GemstoneLineItem = serde_json::from_value(json!({ "price": 500 })).unwrap();
        assert_eq!(gem.count, 0.0);

        let metal: MetalLineItem =
            serde_json::from_value(json!({ "type": "Gold", "weight": "abc" })).unwrap();
        assert_eq!(metal.weight, 0.0);
        assert_eq!(metal.purity, "");
    }

    #[test]
    fn test_non_array_lists_are_empty() {
        let product: PricingInput = serde_json::from_value(json!({
            "name": "Solitaire",
            "gemstones": "none",
            "metals": null,
            "variants": {}
        }))
        .unwrap();

        assert!(product.gemstones.is_empty());
        assert!(product.metals.is_empty());
        assert!(!product.has_variants());
    }

    #[test]
    fn test_product_document_shape() {
        let product: PricingInput = serde_json::from_value(json!({
            "_id": "665f1c",
            "name": "Halo Ring",
            "makingPrice": "1000",
            "gemstones": [{ "price": 500, "count": 2 }, 7],
            "variants": [
                { "variant_id": 1, "name": "Rose", "metal": [{ "Type": "Gold", "purity": "18k", "weight": 3 }], "making_price": 200 }
            ]
        }))
        .unwrap();

        assert_eq!(product.id.as_deref(), Some("665f1c"));
        assert_eq!(product.making_price, 1000.0);
        assert_eq!(product.gemstones.len(), 2);
        assert_eq!(product.gemstones[1], GemstoneLineItem::default());
        assert_eq!(product.variants[0].variant_id.as_deref(), Some("1"));
        assert_eq!(product.variants[0].metal[0].metal_type, "Gold");
    }

    #[test]
    fn test_product_id_and_store_key_together() {
        let product: PricingInput = serde_json::from_value(json!({
            "_id": "665f1c",
            "id": "665f1c",
            "name": "Halo",
            "metals": [{ "type": "Gold", "purity": "18k", "weight": 2 }]
        }))
        .unwrap();
        assert_eq!(product.id.as_deref(), Some("665f1c"));
        assert_eq!(product.metals.len(), 1);

        let product: PricingInput =
            serde_json::from_value(json!({ "id": "", "_id": 42 })).unwrap();
        assert_eq!(product.id.as_deref(), Some("42"));

        let product: PricingInput =
            serde_json::from_value(json!({ "id": "ring-1", "_id": "665f1c" })).unwrap();
        assert_eq!(product.id.as_deref(), Some("ring-1"));
    }

    #[test]
    fn test_out_of_range_numeric_string_is_zero() {
        let metal: MetalLineItem =
            serde_json::from_value(json!({ "type": "Gold", "purity": "18k", "weight": "1e400" })).unwrap();
        assert_eq!(metal.weight, 0.0);

        let metal: MetalLineItem =
            serde_json::from_value(json!({ "type": "Gold", "purity": "18k", "weight": " 2.5 " })).unwrap();
        assert_eq!(metal.weight, 2.5);
    }

    #[test]
    fn test_product_serializes_canonical_fields() {
        let product = PricingInput {
            id: Some("ring-1".to_string()),
            making_price: 250.0,
            ..PricingInput::default()
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], json!("ring-1"));
        assert_eq!(value["makingPrice"], json!(250.0));
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_breakdown_wire_names() {
        let breakdown = VariantPriceBreakdown {
            metal_costs: 1600.0,
            making_charges: 300.0,
            subtotal: 1900.0,
            tax: 95.0,
            total: 1995.0,
            rounded_total: 1995,
        };
        let value = serde_json::to_value(PriceQuote::ok(breakdown)).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["metalCosts"], json!(1600.0));
        assert_eq!(value["data"]["roundedTotal"], json!(1995));
    }
}
