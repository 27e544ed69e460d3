//! # Client Configuration

use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the inventory API.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use stockcart_client::InventoryApiConfig;
///
/// let config = InventoryApiConfig::new("http://localhost:3333/")
///     .timeout(Duration::from_secs(3));
/// assert_eq!(config.endpoint("stock/5"), "http://localhost:3333/stock/5");
/// ```
#[derive(Debug, Clone)]
pub struct InventoryApiConfig {
    /// Base URL, e.g. `http://localhost:3333`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl InventoryApiConfig {
    /// Creates a config with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        InventoryApiConfig {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Rejects base URLs that are not http(s).
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Joins `path` onto the base URL with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joining() {
        let config = InventoryApiConfig::new("http://api.test");
        assert_eq!(config.endpoint("/products/3"), "http://api.test/products/3");

        let config = InventoryApiConfig::new("http://api.test/v1//");
        assert_eq!(config.endpoint("stock/3"), "http://api.test/v1/stock/3");
    }

    #[test]
    fn test_validate() {
        assert!(InventoryApiConfig::new("https://api.test").validate().is_ok());
        assert!(InventoryApiConfig::new("ftp://api.test").validate().is_err());
        assert!(InventoryApiConfig::new("").validate().is_err());
    }
}
