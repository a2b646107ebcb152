//! HTTP request handlers for the company registry API.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use bytes::BytesMut;
use futures::StreamExt;
use log::{debug, warn};
use serde::Deserialize;

use crate::api::auth::bearer_token;
use crate::app_state::AppState;
use crate::error::RegistryError;
use crate::service::company_service::LogoUpload;

/// Query parameters for company creation
#[derive(Debug, Deserialize)]
pub struct CreateCompanyQuery {
    /// Company name, persisted verbatim
    pub name: String,
}

/// List all companies.
/// Handles requests like: GET /companies
#[get("/companies")]
pub async fn list_companies(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, RegistryError> {
    let token = bearer_token(&req)?;

    let companies = app_state.company_service.list_companies(&token).await?;
    debug!("Listing {} companies", companies.len());
    Ok(HttpResponse::Ok().json(companies))
}

/// Create a company from a name and a logo payload.
/// Handles requests like: POST /companies?name=Acme%20Corp
///
/// The logo is the raw request body; its content type is taken from the
/// Content-Type header.
#[post("/companies")]
pub async fn create_company(
    req: HttpRequest,
    query: web::Query<CreateCompanyQuery>,
    mut payload: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, RegistryError> {
    let token = bearer_token(&req)?;

    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!("Error reading logo payload: {}", e);
            RegistryError::Validation("could not read logo payload".to_string())
        })?;
        body.extend_from_slice(&chunk);
    }

    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let logo = if body.is_empty() {
        None
    } else {
        Some(LogoUpload::new(body.freeze(), content_type))
    };

    let inserted = app_state
        .company_service
        .create_company(&token, &query.name, logo)
        .await?;
    Ok(HttpResponse::Created().json(inserted))
}
