//! # In-Memory Storage
//!
//! A [`CartStorage`] that lives and dies with the process. Used when a
//! storefront embeds the store without a database, and by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::state::ports::{CartStorage, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with one key already populated.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        storage
    }

    /// Makes every following `set` fail, like a full disk.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Reads a key without going through the async trait.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().ok().and_then(|e| e.get(key).cloned())
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes rejected".to_string()));
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
