//! # Repository Module
//!
//! Database repository implementations.
//!
//! ## Available Repositories
//!
//! - [`LocalStorageRepository`](storage::LocalStorageRepository) - string
//!   key-value storage with `localStorage` semantics

pub mod storage;
