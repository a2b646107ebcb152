//! Mock implementation of AssetStore for testing

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::assets::{public_object_url, AssetMetadata, AssetStore};
use crate::error::StoreFailure;

const MOCK_BASE_URL: &str = "http://asset-store.local";
const MOCK_BUCKET: &str = "company-logo";

/// Call record for a single upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCall {
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

/// Mock implementation of AssetStore for testing.
///
/// Objects live in memory keyed by object key; every upload and delete call
/// is recorded, and the next upload or delete can be armed to fail.
pub struct MockAssetStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    upload_calls: Mutex<Vec<UploadCall>>,
    delete_calls: Mutex<Vec<String>>,
    fail_upload: Mutex<Option<StoreFailure>>,
    fail_delete: Mutex<Option<StoreFailure>>,
}

impl MockAssetStore {
    /// Create a new mock asset store
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            upload_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            fail_upload: Mutex::new(None),
            fail_delete: Mutex::new(None),
        }
    }

    /// Check whether an object exists under the given key
    pub fn object_exists(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Number of stored objects
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Every upload call made against this store, in order
    pub fn upload_calls(&self) -> Vec<UploadCall> {
        self.upload_calls.lock().unwrap().clone()
    }

    /// Every delete call made against this store, in order
    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }

    /// Make the next upload call fail with the given failure
    pub fn fail_next_upload(&self, failure: StoreFailure) {
        *self.fail_upload.lock().unwrap() = Some(failure);
    }

    /// Make the next delete call fail with the given failure
    pub fn fail_next_delete(&self, failure: StoreFailure) {
        *self.fail_delete.lock().unwrap() = Some(failure);
    }

    /// Clear all objects and recorded calls
    pub fn clear(&self) {
        self.objects.lock().unwrap().clear();
        self.upload_calls.lock().unwrap().clear();
        self.delete_calls.lock().unwrap().clear();
    }
}

impl Default for MockAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for MockAssetStore {
    fn bucket(&self) -> &str {
        MOCK_BUCKET
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(MOCK_BASE_URL, MOCK_BUCKET, key)
    }

    async fn upload(
        &self,
        _token: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<AssetMetadata, StoreFailure> {
        self.upload_calls.lock().unwrap().push(UploadCall {
            key: key.to_string(),
            size: data.len(),
            content_type: content_type.to_string(),
        });

        if let Some(failure) = self.fail_upload.lock().unwrap().take() {
            return Err(failure);
        }

        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(key) {
            return Err(StoreFailure::new("The resource already exists", Some(409)));
        }
        objects.insert(key.to_string(), data.to_vec());

        Ok(AssetMetadata {
            path: format!("{}/{}", MOCK_BUCKET, key),
        })
    }

    async fn delete(&self, _token: &str, key: &str) -> Result<(), StoreFailure> {
        self.delete_calls.lock().unwrap().push(key.to_string());

        if let Some(failure) = self.fail_delete.lock().unwrap().take() {
            return Err(failure);
        }

        // Deleting a missing key is a no-op
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_upload_stores_object_and_records_call() {
        let store = MockAssetStore::new();
        let data = Bytes::from_static(b"logo bytes");

        let metadata = store
            .upload("token", "logo-1-Acme", data, "image/png")
            .await
            .unwrap();
        assert_eq!(metadata.path, "company-logo/logo-1-Acme");
        assert!(store.object_exists("logo-1-Acme"));

        let calls = store.upload_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].key, "logo-1-Acme");
        assert_eq!(calls[0].size, 10);
        assert_eq!(calls[0].content_type, "image/png");
    }

    #[actix_web::test]
    async fn test_upload_rejects_existing_key() {
        let store = MockAssetStore::new();
        let data = Bytes::from_static(b"logo bytes");

        store
            .upload("token", "logo-1-Acme", data.clone(), "image/png")
            .await
            .unwrap();
        let err = store
            .upload("token", "logo-1-Acme", data, "image/png")
            .await
            .unwrap_err();
        assert_eq!(err.status, Some(409));
    }

    #[actix_web::test]
    async fn test_delete_is_idempotent_and_recorded() {
        let store = MockAssetStore::new();
        let data = Bytes::from_static(b"logo bytes");

        store
            .upload("token", "logo-1-Acme", data, "image/png")
            .await
            .unwrap();
        store.delete("token", "logo-1-Acme").await.unwrap();
        assert!(!store.object_exists("logo-1-Acme"));

        // Deleting again succeeds and is still recorded
        store.delete("token", "logo-1-Acme").await.unwrap();
        assert_eq!(store.delete_calls(), vec!["logo-1-Acme", "logo-1-Acme"]);
    }

    #[actix_web::test]
    async fn test_armed_failures_fire_once() {
        let store = MockAssetStore::new();
        let data = Bytes::from_static(b"logo bytes");

        store.fail_next_upload(StoreFailure::new("bucket unavailable", Some(500)));
        let err = store
            .upload("token", "logo-1-Acme", data.clone(), "image/png")
            .await
            .unwrap_err();
        assert_eq!(err.status, Some(500));
        assert!(!store.object_exists("logo-1-Acme"));

        // Failure is consumed, next upload succeeds
        assert!(store
            .upload("token", "logo-1-Acme", data, "image/png")
            .await
            .is_ok());

        store.fail_next_delete(StoreFailure::transport("connection reset"));
        assert!(store.delete("token", "logo-1-Acme").await.is_err());
        // Object survives the failed delete
        assert!(store.object_exists("logo-1-Acme"));
    }

    #[test]
    fn test_public_url_uses_mock_layout() {
        let store = MockAssetStore::new();
        assert_eq!(
            store.public_url("logo-1-Acme"),
            "http://asset-store.local/storage/v1/object/public/company-logo/logo-1-Acme"
        );
    }
}
