//! HTTP API client for the Ozon Seller stock endpoint

use crate::api::{endpoints, types::*, PageResult, StockSource};
use crate::config::Config;
use crate::error::{FetchError, Result};
use async_trait::async_trait;
use ozon_stock_common::Credentials;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

// ============================================================================
// API Client Constants
// ============================================================================

/// Header carrying the seller's client id
pub const CLIENT_ID_HEADER: &str = "Client-Id";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "Api-Key";

/// Maximum characters of an error body kept as diagnostic detail
pub const MAX_ERROR_DETAIL_CHARS: usize = 500;

/// API client for the stock endpoint
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client from CLI configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.timeout())
    }

    /// Test the endpoint with a single-row request
    pub async fn check_connection(&self, credentials: &Credentials) -> PageResult {
        self.fetch_page(credentials, 1, 0).await
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl StockSource for ApiClient {
    async fn fetch_page(&self, credentials: &Credentials, limit: u32, offset: u64) -> PageResult {
        let url = endpoints::stock_on_warehouses_url(&self.base_url);
        debug!(limit, offset, "Requesting stock page");

        let response = self
            .client
            .post(&url)
            .header(CLIENT_ID_HEADER, credentials.client_id())
            .header(API_KEY_HEADER, credentials.api_key())
            .json(&StockRequest::fbo(limit, offset))
            .send()
            .await
            .map_err(|e| FetchError::connection(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), offset, "Stock API returned an error status");
            return Err(FetchError::Api {
                status: status.as_u16(),
                detail: truncate_chars(&body, MAX_ERROR_DETAIL_CHARS),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::connection(error_chain(&e)))?;
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::malformed(e.to_string()))?;

        Ok(rows_from_body(body))
    }
}

/// Keep at most `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Error message followed by its sources, so timeouts and DNS failures show
/// their actual cause
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
