//! # Inventory API
//!
//! ## Response Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP outcome                  Result                                   │
//! │  ────────────                  ──────                                   │
//! │  200 + valid JSON              Ok(Product) / Ok(StockLevel)             │
//! │  200 + unexpected JSON         Err(Parse)                               │
//! │  404                           Err(NotFound)                            │
//! │  other non-2xx                 Err(Api { status, message })             │
//! │  no response in time           Err(Timeout)                             │
//! │  connect / TLS failure         Err(Http)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use stockcart_core::{Product, ProductId, StockLevel};

use crate::config::InventoryApiConfig;
use crate::error::{ClientError, ClientResult};

/// Inventory API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct InventoryApi {
    inner: Arc<InventoryApiInner>,
}

struct InventoryApiInner {
    client: reqwest::Client,
    config: InventoryApiConfig,
}

impl InventoryApi {
    /// Creates a new inventory API client.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not http(s) or the HTTP client fails
    /// to build.
    pub fn new(config: InventoryApiConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(InventoryApiInner { client, config }),
        })
    }

    /// Fetches the current stock ceiling for a product.
    pub async fn get_stock(&self, product_id: ProductId) -> ClientResult<StockLevel> {
        self.get("stock", product_id).await
    }

    /// Fetches a product's display details.
    pub async fn get_product(&self, product_id: ProductId) -> ClientResult<Product> {
        self.get("products", product_id).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        product_id: ProductId,
    ) -> ClientResult<T> {
        let url = self
            .inner
            .config
            .endpoint(&format!("{}/{}", resource, product_id));
        debug!(url = %url, "Inventory request");

        let response = self
            .inner
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                resource,
                id: product_id.to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        serde_json::from_slice(&body)
            .map_err(|e| ClientError::Parse(format!("{}/{}: {}", resource, product_id, e)))
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.inner.config.timeout.as_secs())
        } else {
            ClientError::Http(err)
        }
    }
}

impl std::fmt::Debug for InventoryApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryApi")
            .field("base_url", &self.inner.config.base_url)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
