//! Company creation and listing orchestration.
//!
//! Creating a company is a two-phase write across two independent stores:
//! the logo goes to the asset store first, then the company row is inserted
//! with the logo's public address. The stores share no transaction, so a
//! failed insert is compensated by deleting the logo that was just
//! uploaded.

use bytes::Bytes;
use log::{error, info};
use std::sync::Arc;

use crate::assets::AssetStore;
use crate::error::RegistryError;
use crate::records::{Company, NewCompany, RecordStore};
use crate::service::logo_key::generate_logo_key;

/// Logo payload submitted with a company creation request. Lives only for
/// the duration of one creation attempt.
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub data: Bytes,
    pub content_type: String,
}

impl LogoUpload {
    pub fn new(data: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
        }
    }

    /// Payload size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Orchestrates the record store and asset store clients
pub struct CompanyService {
    records: Arc<dyn RecordStore>,
    assets: Arc<dyn AssetStore>,
}

impl CompanyService {
    /// Create a new company service with injected store clients
    pub fn new(records: Arc<dyn RecordStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { records, assets }
    }

    /// Fetch all company rows.
    ///
    /// An empty listing and a failed listing are distinct outcomes: the
    /// former is `Ok` with no rows, the latter an error.
    pub async fn list_companies(&self, token: &str) -> Result<Vec<Company>, RegistryError> {
        self.records.list_all(token).await.map_err(|failure| {
            error!("Company listing failed: {}", failure);
            RegistryError::RecordStore(failure)
        })
    }

    /// Create a company from a name and a logo payload.
    ///
    /// Phase 1 uploads the logo under a derived key; phase 2 inserts the
    /// row referencing the logo's public address. If the insert fails, the
    /// uploaded logo is deleted again (best effort) so no unreferenced
    /// object outlives the attempt. Each phase runs exactly once.
    pub async fn create_company(
        &self,
        token: &str,
        name: &str,
        logo: Option<LogoUpload>,
    ) -> Result<Vec<Company>, RegistryError> {
        let logo = match logo {
            Some(logo) if !logo.data.is_empty() => logo,
            _ => {
                return Err(RegistryError::Validation(
                    "no logo file provided".to_string(),
                ))
            }
        };
        if name.trim().is_empty() {
            return Err(RegistryError::Validation(
                "company name must not be empty".to_string(),
            ));
        }

        let key = generate_logo_key(name);
        let bucket = self.assets.bucket();
        info!(
            "Uploading logo to bucket {} under key {} ({} bytes, {})",
            bucket,
            key,
            logo.size(),
            logo.content_type
        );

        if let Err(failure) = self
            .assets
            .upload(token, &key, logo.data.clone(), &logo.content_type)
            .await
        {
            error!("Logo upload failed for key {}: {}", key, failure);
            return Err(RegistryError::AssetStore(failure));
        }
        info!("Logo uploaded for key {}", key);

        let row = NewCompany {
            name: name.to_string(),
            logo_url: self.assets.public_url(&key),
        };

        match self.records.insert(token, &row).await {
            Ok(inserted) => {
                info!("Inserted company {} referencing {}", row.name, row.logo_url);
                Ok(inserted)
            }
            Err(failure) => {
                error!("Company insert failed for {}: {}", row.name, failure);
                self.compensate(token, &key).await;
                Err(RegistryError::RecordStore(failure))
            }
        }
    }

    /// Delete an uploaded logo after a failed insert. Failure here is
    /// logged and swallowed: the insert failure stays the outcome of the
    /// creation attempt.
    async fn compensate(&self, token: &str, key: &str) {
        info!("Compensating failed insert by deleting logo {}", key);
        match self.assets.delete(token, key).await {
            Ok(()) => info!("Deleted orphaned logo {}", key),
            Err(failure) => error!(
                "Compensation failed, logo {} may be orphaned: {}",
                key, failure
            ),
        }
    }
}
