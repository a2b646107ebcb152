//! Asset Store Layer Abstraction
//!
//! Logo binaries live in a remote bucket/key object store. This module
//! defines the client contract over that store, allowing the system to use
//! different implementations (HTTP-backed, in-memory mock) without
//! affecting higher-level services.

pub mod http_store;
pub mod mock_store;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::StoreFailure;

/// Metadata returned by the asset store for an uploaded object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetMetadata {
    /// Store path of the object, usually `{bucket}/{key}`
    pub path: String,
}

/// Trait defining the asset store client interface
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Bucket this client writes to
    fn bucket(&self) -> &str;

    /// Publicly resolvable address of an object in the bucket.
    ///
    /// The address is constructed, not verified: it is only correct as long
    /// as the store keeps serving public objects under this path layout.
    fn public_url(&self, key: &str) -> String;

    /// Upload an object under the given key
    async fn upload(
        &self,
        token: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<AssetMetadata, StoreFailure>;

    /// Delete an object. Deleting a key that is already gone is not an
    /// error the caller needs to branch on.
    async fn delete(&self, token: &str, key: &str) -> Result<(), StoreFailure>;
}

/// Build the public address for an object from the store base address,
/// bucket, and key.
pub fn public_object_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        key
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_object_url_layout() {
        assert_eq!(
            public_object_url("http://assets.local", "company-logo", "logo-12345-Acme-Corp"),
            "http://assets.local/storage/v1/object/public/company-logo/logo-12345-Acme-Corp"
        );
    }

    #[test]
    fn test_public_object_url_trims_trailing_slash() {
        assert_eq!(
            public_object_url("http://assets.local/", "company-logo", "k"),
            "http://assets.local/storage/v1/object/public/company-logo/k"
        );
    }
}
