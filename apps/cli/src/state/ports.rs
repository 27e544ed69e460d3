//! # Collaborator Ports
//!
//! The three seams the cart store talks through, and their production
//! adapters.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStore                                       │
//! │                              │                                          │
//! │        ┌─────────────────────┼──────────────────────┐                  │
//! │        ▼                     ▼                      ▼                   │
//! │  InventoryClient         Notifier              CartStorage              │
//! │  get_stock(id)           error(msg)            get(key)                 │
//! │  get_product(id)                               set(key, value)          │
//! │        │                     │                      │                   │
//! │        ▼                     ▼                      ▼                   │
//! │  InventoryApi          ConsoleNotifier     LocalStorageRepository       │
//! │  (stockcart-client)    (notify.rs)         (stockcart-db)              │
//! │                                            MemoryStorage (storage.rs)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockcart_client::{ClientError, InventoryApi};
use stockcart_core::{Product, ProductId, StockLevel};
use stockcart_db::{DbError, LocalStorageRepository};

// =============================================================================
// Errors
// =============================================================================

/// Failure of an inventory lookup.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The HTTP client failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The inventory could not be reached for another reason.
    #[error("Inventory unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a storage read or write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The SQLite layer failed.
    #[error(transparent)]
    Db(#[from] DbError),

    /// The storage medium refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Traits
// =============================================================================

/// Product details and stock levels by product id.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Current stock ceiling for one product.
    async fn get_stock(&self, product_id: ProductId) -> Result<StockLevel, InventoryError>;

    /// Display details for one product.
    async fn get_product(&self, product_id: ProductId) -> Result<Product, InventoryError>;
}

/// User-facing error messages. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// String key-value storage that survives restarts.
#[async_trait]
pub trait CartStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// Shared Handles
// =============================================================================

#[async_trait]
impl<T: InventoryClient + ?Sized> InventoryClient for Arc<T> {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockLevel, InventoryError> {
        (**self).get_stock(product_id).await
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        (**self).get_product(product_id).await
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

#[async_trait]
impl<T: CartStorage + ?Sized> CartStorage for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}

// =============================================================================
// Production Adapters
// =============================================================================

#[async_trait]
impl InventoryClient for InventoryApi {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockLevel, InventoryError> {
        Ok(InventoryApi::get_stock(self, product_id).await?)
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        Ok(InventoryApi::get_product(self, product_id).await?)
    }
}

#[async_trait]
impl CartStorage for LocalStorageRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(LocalStorageRepository::get(self, key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(LocalStorageRepository::set(self, key, value).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockcart_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_local_storage_adapter() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let storage: Arc<dyn CartStorage> = Arc::new(db.storage());

        assert_eq!(storage.get("k").await.unwrap(), None);
        storage.set("k", "[]").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_storage_failure_after_close() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let storage = db.storage();
        db.close().await;

        let err = CartStorage::set(&storage, "k", "[]").await.unwrap_err();
        assert!(matches!(err, StorageError::Db(_)));
    }

    #[test]
    fn test_inventory_error_display() {
        let err = InventoryError::from(ClientError::NotFound {
            resource: "products",
            id: "9".to_string(),
        });
        assert_eq!(err.to_string(), "products not found: 9");
    }
}
