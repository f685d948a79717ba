//! # Validation Module
//!
//! Input validation for the sale ledger boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                     │
//! │  └── Form hints (required fields, min quantity)                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger append (Rust)                                          │
//! │  └── THIS MODULE: reject before anything is recorded                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Metrics deriver                                                        │
//! │  └── Assumes well-formed sales, has no failure path                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fluir_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Consultoria Premium").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// The name is *not* normalized: `"Camiseta"` and `"Camiseta "` stay two
/// different products.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be positive (> 0); free items are not recordable sales
///
/// ## Example
/// ```rust
/// use fluir_core::money::Money;
/// use fluir_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a goal target.
///
/// ## Rules
/// - Must be non-negative; zero is a legal target
pub fn validate_target(target: Money) -> ValidationResult<()> {
    if target.is_negative() {
        return Err(ValidationError::InvalidFormat {
            field: "target".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
