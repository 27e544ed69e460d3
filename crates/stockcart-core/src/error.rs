//! # Error Types
//!
//! Domain-specific error types for stockcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockcart-core errors (this file)                                     │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input / persisted-shape validation failures    │
//! │                                                                         │
//! │  stockcart-db errors (separate crate)                                  │
//! │  └── DbError          - Local storage failures                         │
//! │                                                                         │
//! │  stockcart-client errors (separate crate)                              │
//! │  └── ClientError      - Inventory API failures                         │
//! │                                                                         │
//! │  Flow: CoreError / ClientError → CartError → CartNotice → Notifier     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
///
/// Every transition on [`Cart`](crate::Cart) either yields a new cart or one
/// of these; the cart it was called on is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The product has no entry in the cart.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(ProductId),

    /// The product already has an entry (use an increment instead).
    #[error("Product {0} is already in the cart")]
    AlreadyInCart(ProductId),

    /// Requested quantity is above the stock ceiling.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart holds 3 × product 5
    ///      │
    ///      ▼
    /// Click "+" → fetch stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 5, available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// UI shows: "requested quantity out of stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// Quantity below one (entries are removed, never zeroed).
    #[error("Quantity {0} is not allowed, must be at least 1")]
    InvalidAmount(i64),

    /// Persisted cart could not be parsed.
    #[error("Stored cart is unreadable: {0}")]
    CorruptCart(String),

    /// Cart could not be encoded for storage.
    #[error("Cart serialization failed: {0}")]
    Serialization(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Validation errors for requests and persisted entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Numeric value must be at least `min`.
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall { field: String, min: i64, value: i64 },

    /// Same product appears twice.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
