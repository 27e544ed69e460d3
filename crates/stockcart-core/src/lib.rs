//! # stockcart-core: Pure Cart Logic for stockcart
//!
//! This crate is the **heart** of stockcart. It contains the cart state
//! transitions as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        stockcart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI / CLI                          │   │
//! │  │    Product list ──► Add ──► Cart page ──► Quantity / Remove    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    CartStore (apps/cli)                         │   │
//! │  │    stock lookups, notifications, write-through persistence      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockcart-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  amounts  │  │   │
//! │  │   │ CartEntry │  │  cents    │  │  Totals   │  │  entries  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, CartEntry, StockLevel)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart value and its replace-wholesale transitions
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use stockcart_core::{Cart, Money, Product, ProductId, StockLevel};
//!
//! let sneaker = Product::new(ProductId::new(5), "Tênis Runner", Money::from_cents(13990), "runner.jpg");
//!
//! let cart = Cart::new().with_product(sneaker).unwrap();
//! let cart = cart.incremented(ProductId::new(5), StockLevel::new(3)).unwrap();
//!
//! assert_eq!(cart.find(ProductId::new(5)).unwrap().amount, 2);
//! assert_eq!(cart.totals().subtotal.cents(), 27980);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockcart_core::Money` instead of
// `use stockcart_core::money::Money`

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the serialized cart lives under.
///
/// One key holds the whole cart as a JSON array of [`CartEntry`] objects.
pub const CART_STORAGE_KEY: &str = "@stockcart:cart";

