//! # Commands Module
//!
//! Everything the `stockcart` binary can be asked to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! └── cart.rs     ◄─── show, add, remove, update, clear
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ stockcart update 5 7 --json                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  clap parses CartCommand::Update { product_id: 5, amount: 7 }          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  execute(&store, &command)                                             │
//! │    └── store.update_product_amount(..)   (notices go to stderr)        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CartResponse { items, totals } ──► table or JSON on stdout            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;

pub use cart::{execute, render_table, CartCommand, CartResponse};
