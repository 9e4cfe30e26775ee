//! # Validation Module
//!
//! Input validation for the metal price sheet.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Admin price update ──► validate_metal_price() ──► upsert into store   │
//! │                                                                         │
//! │  Product quote ───────► (no validation) ─────────► PricingEngine       │
//! │                         bad input prices at zero                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gemcraft_core::validation::validate_metal_price;
//!
//! assert!(validate_metal_price("Gold", "18k", 4000.0).is_ok());
//! assert!(validate_metal_price("Gold", "18k", -1.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_METAL_NAME_LEN, MAX_PURITY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a metal name.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
pub fn validate_metal_name(metal: &str) -> ValidationResult<()> {
    let metal = metal.trim();

    if metal.is_empty() {
        return Err(ValidationError::Required {
            field: "metal".to_string(),
        });
    }

    if metal.chars().count() > MAX_METAL_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "metal".to_string(),
            max: MAX_METAL_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a purity designation ("18k", "925", "99.9").
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
/// - Letters, digits and `.` only
pub fn validate_purity(purity: &str) -> ValidationResult<()> {
    let purity = purity.trim();

    if purity.is_empty() {
        return Err(ValidationError::Required {
            field: "purity".to_string(),
        });
    }

    if purity.chars().count() > MAX_PURITY_LEN {
        return Err(ValidationError::TooLong {
            field: "purity".to_string(),
            max: MAX_PURITY_LEN,
        });
    }

    if !purity.chars().all(|c| c.is_alphanumeric() || c == '.') {
        return Err(ValidationError::InvalidFormat {
            field: "purity".to_string(),
            reason: "must contain only letters, digits, and '.'".to_string(),
        });
    }

    Ok(())
}

/// Validates a price per gram: finite and not negative. Zero is allowed.
pub fn validate_price_per_gram(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price_per_gram".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price_per_gram".to_string(),
        });
    }

    Ok(())
}

/// Validates a full price sheet entry.
pub fn validate_metal_price(metal: &str, purity: &str, price_per_gram: f64) -> ValidationResult<()> {
    validate_metal_name(metal)?;
    validate_purity(purity)?;
    validate_price_per_gram(price_per_gram)
}

// =============================================================================
// Unit Tests
// =============================================================================
