//! Error types shared by the service and API layers.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Failure reported by a remote store client.
///
/// Carries the upstream message and, when the store answered at all, the
/// status code it answered with.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreFailure {
    pub message: String,
    pub status: Option<u16>,
}

impl StoreFailure {
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Failure for a request that never reached the store.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(message, None)
    }
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for StoreFailure {}

/// Unified error type for the company registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Request was rejected before any store was contacted.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Caller did not present a usable bearer token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The asset store rejected or failed the logo upload.
    #[error("asset store error: {0}")]
    AssetStore(StoreFailure),

    /// The record store rejected or failed the query or insert.
    #[error("record store error: {0}")]
    RecordStore(StoreFailure),
}

impl RegistryError {
    /// Phase tag exposed to API callers so they can tell which side of the
    /// two-phase write failed.
    pub fn phase(&self) -> &'static str {
        match self {
            RegistryError::Validation(_) => "validation",
            RegistryError::Unauthorized(_) => "auth",
            RegistryError::AssetStore(_) => "asset-store",
            RegistryError::RecordStore(_) => "record-store",
        }
    }
}

impl actix_web::ResponseError for RegistryError {
    fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
            RegistryError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RegistryError::AssetStore(_) | RegistryError::RecordStore(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
            "phase": self.phase(),
        }))
    }
}
