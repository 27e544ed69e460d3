//! # Validation Module
//!
//! Checks applied to quantities and to carts read back from storage.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: serde                                                        │
//! │  ├── Shape: JSON array of objects with id/title/price/image/amount     │
//! │  └── Types: integer id and amount, numeric price                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── amount >= 1 on every entry                                        │
//! │  └── product ids unique across the cart                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart transitions (cart.rs)                                   │
//! │  └── Stock ceiling per operation                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockcart_core::validation::validate_amount;
//!
//! assert!(validate_amount(2).is_ok());
//! assert!(validate_amount(0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::CartEntry;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount < 1 {
        return Err(ValidationError::TooSmall {
            field: "amount".to_string(),
            min: 1,
            value: amount,
        });
    }
    Ok(())
}

/// Validates a sequence of entries as a whole cart.
///
/// ## Rules
/// - Every amount passes [`validate_amount`]
/// - No product id appears twice
pub fn validate_entries(entries: &[CartEntry]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(entries.len());

    for entry in entries {
        validate_amount(entry.amount)?;

        if !seen.insert(entry.id()) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: entry.id().to_string(),
            });
        }
    }

    Ok(())
}
