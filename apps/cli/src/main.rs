//! # stockcart Entry Point
//!
//! ## Invocation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ stockcart add 5                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load config ──► open SQLite ──► CartStore::load (reads saved cart)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_product(5) ──► inventory API ──► commit (memory + SQLite)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  print cart snapshot; exit 2 if a notice fired                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    stockcart_cli_lib::run()
}
