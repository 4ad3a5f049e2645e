//! `ozon-stock check` command implementation
//!
//! Sends a single one-row request to verify credentials and connectivity.

use crate::api::ApiClient;
use crate::error::Result;
use crate::report;
use colored::Colorize;
use ozon_stock_common::Credentials;
use tracing::info;

/// Test the stock endpoint
pub async fn run(client: &ApiClient, credentials: &Credentials) -> Result<()> {
    println!("{} Testing connection to {}...", "→".cyan(), client.base_url());

    match client.check_connection(credentials).await {
        Ok(rows) => {
            info!(rows = rows.len(), "Connection check succeeded");
            println!("{} Connection successful", "✓".green().bold());
            Ok(())
        }
        Err(err) => {
            print!("{}", report::render_fetch_failure(&err));
            Err(err.into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::{CliError, FetchError};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials::new("42", "secret").unwrap()
    }

    #[tokio::test]
    async fn test_check_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "rows": [] } })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        assert!(run(&client, &credentials()).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let err = run(&client, &credentials()).await.unwrap_err();
        assert!(matches!(err, CliError::Fetch(FetchError::Api { status: 401, .. })));
    }
}
