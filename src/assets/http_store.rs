//! HTTP-backed asset store client.
//!
//! Objects are uploaded with a POST to the store's object endpoint and
//! removed with a DELETE on the same path. Public addresses follow the
//! store's `/storage/v1/object/public/{bucket}/{key}` layout.

use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, error};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::assets::{public_object_url, AssetMetadata, AssetStore};
use crate::config::AssetStoreConfig;
use crate::error::StoreFailure;

/// Asset store client backed by a remote object storage service
pub struct HttpAssetStore {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
    cache_max_age: u32,
}

/// Upload response body; field names vary across store versions
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
    path: Option<String>,
}

impl HttpAssetStore {
    /// Create a new HTTP asset store client from configuration
    pub fn new(config: &AssetStoreConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build asset store HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
            cache_max_age: config.cache_max_age,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    async fn failure_from(response: reqwest::Response) -> StoreFailure {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = if text.is_empty() {
            status.to_string()
        } else {
            text
        };
        StoreFailure::new(message, Some(status.as_u16()))
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.base_url, &self.bucket, key)
    }

    async fn upload(
        &self,
        token: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<AssetMetadata, StoreFailure> {
        let url = self.object_url(key);
        debug!("Uploading {} bytes to {}", data.len(), url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, format!("max-age={}", self.cache_max_age))
            .bearer_auth(token)
            .body(data)
            .send()
            .await
            .map_err(|e| StoreFailure::transport(e.to_string()))?;

        if !response.status().is_success() {
            let failure = Self::failure_from(response).await;
            error!("Asset upload to {} failed: {}", url, failure);
            return Err(failure);
        }

        // The store echoes the object path back; fall back to bucket/key if
        // the body is not in a known shape.
        let path = response
            .json::<UploadResponse>()
            .await
            .ok()
            .and_then(|body| body.key.or(body.path))
            .unwrap_or_else(|| format!("{}/{}", self.bucket, key));

        Ok(AssetMetadata { path })
    }

    async fn delete(&self, token: &str, key: &str) -> Result<(), StoreFailure> {
        let url = self.object_url(key);
        debug!("Deleting object at {}", url);

        let response = self
            .client
            .delete(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreFailure::transport(e.to_string()))?;

        // A missing key counts as already deleted
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            let failure = Self::failure_from(response).await;
            error!("Asset delete at {} failed: {}", url, failure);
            return Err(failure);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn store() -> HttpAssetStore {
        let mut config = AppConfig::default().asset_store;
        config.base_url = "http://assets.local/".to_string();
        config.bucket = "company-logo".to_string();
        HttpAssetStore::new(&config)
    }

    #[test]
    fn test_object_url_construction() {
        let store = store();
        assert_eq!(
            store.object_url("logo-12345-Acme-Corp"),
            "http://assets.local/storage/v1/object/company-logo/logo-12345-Acme-Corp"
        );
    }

    #[test]
    fn test_public_url_matches_store_layout() {
        let store = store();
        assert_eq!(
            store.public_url("logo-12345-Acme-Corp"),
            "http://assets.local/storage/v1/object/public/company-logo/logo-12345-Acme-Corp"
        );
    }
}
