//! # stockcart-client: Inventory API Client
//!
//! Typed access to the two inventory endpoints the cart depends on.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Inventory Lookups                                 │
//! │                                                                         │
//! │  CartStore::add_product(5)                                             │
//! │       │                                                                 │
//! │       ├── in cart? ──► InventoryApi::get_stock(5)                      │
//! │       │                   GET {base}/stock/5     → StockLevel          │
//! │       │                                                                 │
//! │       └── new? ──────► InventoryApi::get_product(5)                    │
//! │                           GET {base}/products/5  → Product             │
//! │                                                                         │
//! │  Any failure ──► ClientError ──► "error adding product" notice         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use stockcart_client::{InventoryApi, InventoryApiConfig};
//!
//! let api = InventoryApi::new(InventoryApiConfig::new("http://localhost:3333"))?;
//! let stock = api.get_stock(ProductId::new(5)).await?;
//! ```

pub mod config;
pub mod error;
pub mod inventory;

pub use config::InventoryApiConfig;
pub use error::{ClientError, ClientResult};
pub use inventory::InventoryApi;
