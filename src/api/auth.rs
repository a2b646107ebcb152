//! Bearer token extraction for API requests.
//!
//! Tokens are issued elsewhere; this layer only requires that one is
//! present and forwards it to the store clients.

use actix_web::HttpRequest;
use log::warn;

use crate::error::RegistryError;

/// Extract the bearer token from the Authorization header
pub fn bearer_token(req: &HttpRequest) -> Result<String, RegistryError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| {
            warn!("Missing Authorization header");
            RegistryError::Unauthorized("missing Authorization header".to_string())
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header format");
            RegistryError::Unauthorized("invalid Authorization header".to_string())
        })?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => {
            warn!("Authorization header is not a bearer token");
            Err(RegistryError::Unauthorized(
                "expected a bearer token".to_string(),
            ))
        }
    }
}
