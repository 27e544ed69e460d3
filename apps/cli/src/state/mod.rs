//! # State Module
//!
//! The cart store and everything it is wired to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │    CartStore     │ │    AppConfig     │ │  Notifiers           │   │
//! │  │   (cart.rs)      │ │   (config.rs)    │ │  (notify.rs)         │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  watch::Sender   │ │  [api]           │ │  ConsoleNotifier     │   │
//! │  │  <Cart>          │ │  [storage]       │ │  RecordingNotifier   │   │
//! │  │  Mutex<()>       │ │                  │ │                      │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ports.rs: InventoryClient / Notifier / CartStorage traits + adapters  │
//! │  storage.rs: MemoryStorage                                             │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: mutations serialized by an async mutex                   │
//! │  • Snapshots: lock-free reads from the watch channel                   │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod notify;
mod ports;
mod storage;

pub use cart::{CartError, CartStore};
pub use config::{ApiSettings, AppConfig, ConfigError, ConfigResult, StorageSettings};
pub use notify::{CartNotice, ConsoleNotifier, RecordingNotifier};
pub use ports::{CartStorage, InventoryClient, InventoryError, Notifier, StorageError};
pub use storage::MemoryStorage;
