//! # Repository Module
//!
//! Database repository implementations for Gemcraft.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.metal_prices().get("Gold", "18k")                          │
//! │       ▼                                                                 │
//! │  MetalPriceRepository                                                  │
//! │  ├── get(&self, metal, purity)                                         │
//! │  ├── upsert(&self, metal, purity, price_per_gram)                      │
//! │  ├── list(&self)                                                       │
//! │  ├── delete(&self, metal, purity)                                      │
//! │  └── impl PriceLookup  ◄── what the pricing engine sees                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MetalPriceRepository`](metal_price::MetalPriceRepository) - Metal price sheet

pub mod metal_price;
