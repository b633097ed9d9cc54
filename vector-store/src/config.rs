//! Runtime and collection configuration.

use crate::errors::StoreError;

/// Configuration for the remote Chroma store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Chroma HTTP endpoint, e.g. `https://cdb.example.org`.
    pub url: String,
    /// Static bearer token sent with every request.
    pub bearer_token: String,
    /// Target collection name.
    pub collection: String,
    /// Request timeout in seconds (30 when `None`).
    pub timeout_secs: Option<u64>,
}

impl StoreConfig {
    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        let url = self.url.trim();
        if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StoreError::Config(
                "url must start with http:// or https://".into(),
            ));
        }
        if self.bearer_token.trim().is_empty() {
            return Err(StoreError::Config("bearer_token is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        Ok(())
    }
}
