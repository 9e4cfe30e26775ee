//! # Error Types
//!
//! Domain-specific error types for gemcraft-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gemcraft-core errors (this file)                                      │
//! │  ├── ValidationError   - Metal price input failures                    │
//! │  └── PriceLookupError  - Price store could not answer                  │
//! │                                                                         │
//! │  gemcraft-db errors (separate crate)                                   │
//! │  └── DbError           - Database operation failures                   │
//! │                                                                         │
//! │  Flow: DbError → PriceLookupError → PricingEngine (coerced to 0)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself has no error type. Every quote succeeds; a
//! failed lookup degrades to a zero price-per-gram.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when a metal price record is written to the price sheet.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., purity with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Price Lookup Error
// =============================================================================

/// Failure reported by a [`PriceLookup`](crate::lookup::PriceLookup)
/// implementation.
///
/// ## When This Occurs
/// - Price store unreachable (pool closed, file missing)
/// - Query failed at runtime
///
/// The engine logs this and prices the metal line at zero.
#[derive(Debug, Error)]
pub enum PriceLookupError {
    #[error("Metal price store unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
