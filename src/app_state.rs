//! Application State Management
//!
//! This module builds the store clients from configuration and wires them
//! into the company service, following the dependency injection pattern.

use log::info;
use std::sync::Arc;

use crate::assets::{http_store::HttpAssetStore, mock_store::MockAssetStore, AssetStore};
use crate::config::{AppConfig, AssetBackend, RecordBackend};
use crate::records::{mock_store::MockRecordStore, rest_store::RestRecordStore, RecordStore};
use crate::service::company_service::CompanyService;

/// Application state containing the company service and its configuration
#[derive(Clone)]
pub struct AppState {
    pub company_service: Arc<CompanyService>,
    pub config: AppConfig,
}

impl AppState {
    /// Create a new application state with services configured from the
    /// on-disk configuration
    pub fn new() -> Self {
        let config = AppConfig::load().expect("Failed to load configuration");
        Self::from_config(config)
    }

    /// Create application state from configuration
    pub fn from_config(config: AppConfig) -> Self {
        info!("Initializing application state with configuration");

        let record_store: Arc<dyn RecordStore> = match config.record_store.backend {
            RecordBackend::Rest => {
                info!(
                    "Using REST record store at {} (table: {})",
                    config.record_store.base_url, config.record_store.table
                );
                Arc::new(RestRecordStore::new(&config.record_store))
            }
            RecordBackend::Mock => {
                info!("Using mock record store");
                Arc::new(MockRecordStore::new())
            }
        };

        let asset_store: Arc<dyn AssetStore> = match config.asset_store.backend {
            AssetBackend::Http => {
                info!(
                    "Using HTTP asset store at {} (bucket: {})",
                    config.asset_store.base_url, config.asset_store.bucket
                );
                Arc::new(HttpAssetStore::new(&config.asset_store))
            }
            AssetBackend::Mock => {
                info!("Using mock asset store");
                Arc::new(MockAssetStore::new())
            }
        };

        let company_service = Arc::new(CompanyService::new(record_store, asset_store));

        info!("Application state initialized successfully");
        Self {
            company_service,
            config,
        }
    }

    /// Create application state for testing with mock backends, returning
    /// handles to the mocks so tests can assert on recorded calls
    pub fn new_for_testing() -> (Self, Arc<MockRecordStore>, Arc<MockAssetStore>) {
        let config = AppConfig::default();
        let record_store = Arc::new(MockRecordStore::new());
        let asset_store = Arc::new(MockAssetStore::new());

        let company_service = Arc::new(CompanyService::new(
            record_store.clone(),
            asset_store.clone(),
        ));

        (
            Self {
                company_service,
                config,
            },
            record_store,
            asset_store,
        )
    }
}
