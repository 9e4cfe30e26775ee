//! # gemcraft-db: Metal Price Store for Gemcraft
//!
//! This crate persists the metal price sheet and serves it to the pricing
//! engine. It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Gemcraft Data Flow                               │
//! │                                                                         │
//! │  Quote request (product document)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricingEngine<MetalPriceRepository>  (gemcraft-core)                  │
//! │       │ find_price_per_gram                                             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   gemcraft-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐ │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │ │   │
//! │  │   │   (pool.rs)   │◄───│ MetalPriceRepo     │  │ 001_metal_ │ │   │
//! │  │   │  SqlitePool   │    │ (metal_price.rs)   │  │ prices.sql │ │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (GEMCRAFT_DB_PATH)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`config`] - Environment configuration for the binaries
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gemcraft_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/db.sqlite")).await?;
//! db.metal_prices().upsert("Gold", "18k", 4000.0).await?;
//!
//! let quote = db
//!     .pricing_engine()
//!     .compute_product_price(&product, &PriceQuoteOptions::default())
//!     .await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, QuoteConfig};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::metal_price::MetalPriceRepository;

/// Installs the `tracing` subscriber used by the binaries.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every metal lookup
/// - Default: `info,gemcraft_core=debug,gemcraft_db=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,gemcraft_core=debug,gemcraft_db=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
