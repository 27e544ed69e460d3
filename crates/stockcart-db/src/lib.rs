//! # stockcart-db: Local Storage for stockcart
//!
//! A persistent string key-value store with the semantics of browser
//! `localStorage`, kept in a local SQLite file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        stockcart Data Flow                              │
//! │                                                                         │
//! │  CartStore commit (apps/cli)                                           │
//! │       │  storage.set("@stockcart:cart", "[{...}]")                     │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockcart-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │ LocalStorage       │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ Repository         │  │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │ get/set/remove     │  │ 001_*.sql  │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: <data dir>/stockcart.db  (table local_storage)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque to this crate. What lives under a key, and whether it
//! parses, is the caller's business.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockcart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("stockcart.db")).await?;
//! let storage = db.storage();
//!
//! storage.set("@stockcart:cart", "[]").await?;
//! assert_eq!(storage.get("@stockcart:cart").await?.as_deref(), Some("[]"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbLocation};
pub use repository::storage::LocalStorageRepository;
