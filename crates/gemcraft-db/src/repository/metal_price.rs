//! # Metal Price Repository
//!
//! Database operations for the metal price sheet.
//!
//! ## Key Operations
//! - Exact `(metal, purity)` lookup for the pricing engine
//! - Upsert for the admin price update
//! - Listing and removal for the admin screen
//!
//! ## Read / Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Admin price update                 Product quote                       │
//! │       │                                  │                              │
//! │       ▼                                  ▼                              │
//! │  upsert("Gold","18k",4150.0)        PricingEngine                       │
//! │       │                                  │ find_price_per_gram          │
//! │       ▼                                  ▼                              │
//! │  ┌──────────────────────────────────────────────────────────────┐      │
//! │  │ metal_prices                                                  │      │
//! │  │ Gold      | 18k | 4150.00   ← ON CONFLICT (metal, purity)    │      │
//! │  │ Silver    | 925 |   80.00                 DO UPDATE          │      │
//! │  └──────────────────────────────────────────────────────────────┘      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use gemcraft_core::validation::validate_metal_price;
use gemcraft_core::{MetalPrice, PriceLookup, PriceLookupError};

/// Repository for the metal price sheet.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MetalPriceRepository::new(pool);
///
/// repo.upsert("Gold", "18k", 4000.0).await?;
/// let gold = repo.get("Gold", "18k").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MetalPriceRepository {
    pool: SqlitePool,
}

impl MetalPriceRepository {
    /// Creates a new MetalPriceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MetalPriceRepository { pool }
    }

    /// Gets the record for an exact `(metal, purity)` pair.
    ///
    /// ## Returns
    /// * `Ok(Some(MetalPrice))` - Record found
    /// * `Ok(None)` - No price on file
    pub async fn get(&self, metal: &str, purity: &str) -> DbResult<Option<MetalPrice>> {
        let price = sqlx::query_as::<_, MetalPrice>(
            r#"
            SELECT id, metal, purity, price_per_gram, created_at, updated_at
            FROM metal_prices
            WHERE metal = ?1 AND purity = ?2
            "#,
        )
        .bind(metal)
        .bind(purity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(price)
    }

    /// Creates or replaces the price for a `(metal, purity)` pair.
    ///
    /// An existing row keeps its `id` and `created_at`; only the price and
    /// `updated_at` change.
    ///
    /// ## Returns
    /// * `Ok(MetalPrice)` - The stored record
    /// * `Err(DbError::Validation)` - Empty metal/purity or negative price
    pub async fn upsert(&self, metal: &str, purity: &str, price_per_gram: f64) -> DbResult<MetalPrice> {
        validate_metal_price(metal, purity, price_per_gram)?;

        let metal = metal.trim();
        let purity = purity.trim();
        let now = Utc::now();

        let record = sqlx::query_as::<_, MetalPrice>(
            r#"
            INSERT INTO metal_prices (id, metal, purity, price_per_gram, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ON CONFLICT (metal, purity) DO UPDATE SET
                price_per_gram = excluded.price_per_gram,
                updated_at = excluded.updated_at
            RETURNING id, metal, purity, price_per_gram, created_at, updated_at
            "#,
        )
        .bind(generate_metal_price_id())
        .bind(metal)
        .bind(purity)
        .bind(price_per_gram)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        info!(metal, purity, price_per_gram, "Metal price updated");

        Ok(record)
    }

    /// Lists the whole price sheet, ordered by metal then purity.
    pub async fn list(&self) -> DbResult<Vec<MetalPrice>> {
        let prices = sqlx::query_as::<_, MetalPrice>(
            r#"
            SELECT id, metal, purity, price_per_gram, created_at, updated_at
            FROM metal_prices
            ORDER BY metal, purity
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(prices)
    }

    /// Removes a price.
    ///
    /// ## Returns
    /// * `Ok(true)` - A row was removed
    /// * `Ok(false)` - Nothing on file for this pair
    pub async fn delete(&self, metal: &str, purity: &str) -> DbResult<bool> {
        debug!(metal, purity, "Deleting metal price");

        let result = sqlx::query("DELETE FROM metal_prices WHERE metal = ?1 AND purity = ?2")
            .bind(metal)
            .bind(purity)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts price sheet entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM metal_prices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// The price sheet as seen by the pricing engine.
///
/// No caching: each call re-queries.
#[async_trait]
impl PriceLookup for MetalPriceRepository {
    async fn find_price_per_gram(
        &self,
        metal: &str,
        purity: &str,
    ) -> Result<Option<f64>, PriceLookupError> {
        debug!(metal, purity, "Looking up metal price");

        let record = self.get(metal, purity).await?;
        Ok(record.map(|r| r.price_per_gram))
    }
}

/// Helper to generate a new metal price ID.
pub fn generate_metal_price_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
