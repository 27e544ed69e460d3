//! # Domain Types
//!
//! Core domain types used throughout stockcart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   CartEntry     │   │   StockLevel    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (integer)   │──►│  ...Product     │   │  amount         │       │
//! │  │  title          │   │  amount (≥ 1)   │   │  (ceiling for   │       │
//! │  │  price (Money)  │   │                 │   │   one product)  │       │
//! │  │  image          │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Product and StockLevel come from the inventory API.                   │
//! │  CartEntry is what the cart holds and what gets persisted.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! A persisted entry is the product object with `amount` alongside its fields:
//! ```json
//! { "id": 5, "title": "Tênis Runner", "price": 139.9, "image": "runner.jpg", "amount": 2 }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Identifier
// =============================================================================

/// Identifier of a product in the inventory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    /// Wraps a raw inventory identifier.
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as served by the inventory API.
///
/// Display fields are carried through untouched; the cart logic only
/// ever looks at `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Display name.
    #[serde(alias = "name")]
    pub title: String,

    /// Unit price. Travels as a decimal number (`139.9`), held as cents.
    ///
    /// Sub-cent digits from the API are rounded away on parse and are not
    /// written back: `1.239` is stored as `1.24`.
    #[ts(type = "number")]
    pub price: Money,

    /// Image URL.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Creates a product from its display fields.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// A product held in the cart together with its quantity.
///
/// ## Invariants
/// - `amount >= 1` (entries are removed, never zeroed)
/// - At most one entry per `product.id` in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartEntry {
    /// The product snapshot taken when it was first added.
    #[serde(flatten)]
    pub product: Product,

    /// Quantity in the cart.
    #[ts(type = "number")]
    pub amount: i64,
}

impl CartEntry {
    /// Creates a fresh entry with a quantity of one.
    pub fn new(product: Product) -> Self {
        CartEntry { product, amount: 1 }
    }

    /// Returns the product identifier.
    #[inline]
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Returns a copy of this entry carrying a different quantity.
    pub fn with_amount(&self, amount: i64) -> Self {
        CartEntry {
            product: self.product.clone(),
            amount,
        }
    }

    /// Calculates the line total (unit price × amount).
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.amount)
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// Maximum purchasable quantity for one product.
///
/// Fetched on demand for a single operation; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockLevel {
    /// Units available.
    #[ts(type = "number")]
    pub amount: i64,
}

impl StockLevel {
    /// Creates a stock level.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        StockLevel { amount }
    }

    /// Checks whether `requested` units fit under this ceiling.
    #[inline]
    pub const fn allows(&self, requested: i64) -> bool {
        requested <= self.amount
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Payload of a quantity change coming from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateProductAmount {
    /// Product whose quantity changes.
    pub product_id: ProductId,

    /// Requested quantity. Values below one are ignored.
    #[ts(type = "number")]
    pub amount: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
