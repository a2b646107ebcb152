//! REST-backed record store client.
//!
//! Talks to a PostgREST-compatible endpoint: rows are read with a `select`
//! query and inserted with a POST that asks for the inserted representation
//! back. The project API key rides on every request next to the caller's
//! bearer token.

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;

use crate::config::RecordStoreConfig;
use crate::error::StoreFailure;
use crate::records::{Company, NewCompany, RecordStore};

/// Record store client backed by a remote REST endpoint
pub struct RestRecordStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestRecordStore {
    /// Create a new REST record store client from configuration
    pub fn new(config: &RecordStoreConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build record store HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            table: config.table.clone(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    async fn read_rows(response: reqwest::Response) -> Result<Vec<Company>, StoreFailure> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                status.to_string()
            } else {
                text
            };
            error!("Record store request failed with {}: {}", status, message);
            return Err(StoreFailure::new(message, Some(status.as_u16())));
        }

        response
            .json::<Vec<Company>>()
            .await
            .map_err(|e| StoreFailure::transport(format!("invalid record store response: {}", e)))
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn list_all(&self, token: &str) -> Result<Vec<Company>, StoreFailure> {
        let url = format!("{}?select=*", self.table_url());
        debug!("Listing rows from {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreFailure::transport(e.to_string()))?;

        Self::read_rows(response).await
    }

    async fn insert(
        &self,
        token: &str,
        company: &NewCompany,
    ) -> Result<Vec<Company>, StoreFailure> {
        let url = self.table_url();
        debug!("Inserting row into {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(token)
            .json(std::slice::from_ref(company))
            .send()
            .await
            .map_err(|e| StoreFailure::transport(e.to_string()))?;

        Self::read_rows(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_table_url_construction() {
        let mut config = AppConfig::default().record_store;
        config.base_url = "http://records.local/".to_string();
        config.table = "companies".to_string();

        let store = RestRecordStore::new(&config);
        assert_eq!(store.table_url(), "http://records.local/rest/v1/companies");
    }
}
