//! Record Store Layer Abstraction
//!
//! Structured company rows live in a remote table-oriented store. This
//! module defines the client contract over that store, allowing the system
//! to use different implementations (REST-backed, in-memory mock) without
//! affecting higher-level services.

pub mod mock_store;
pub mod rest_store;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreFailure;

/// A persisted company row, as returned by the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    /// Store-assigned primary key
    pub id: i64,
    /// Company name, persisted verbatim
    pub name: String,
    /// Public address of the stored logo, derived at creation time and
    /// never supplied by the caller
    pub logo_url: String,
    /// Store-assigned creation timestamp, absent on backends that do not
    /// track one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Column values for a company row that has not been inserted yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub logo_url: String,
}

/// Trait defining the record store client interface
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every company row
    async fn list_all(&self, token: &str) -> Result<Vec<Company>, StoreFailure>;

    /// Insert one company row and return the inserted representation
    async fn insert(&self, token: &str, company: &NewCompany)
        -> Result<Vec<Company>, StoreFailure>;
}
