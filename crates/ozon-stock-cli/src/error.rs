//! Error types for the ozon-stock CLI
//!
//! `CliError` carries user-facing messages with a hint on how to fix the
//! problem. `FetchError` describes why a single page request failed; the
//! paginator keeps it as a value next to the records fetched so far.

use ozon_stock_common::StockError;
use std::path::Path;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Why one page request failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure: DNS, refused connection, timeout, TLS
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// Non-success HTTP status. `detail` holds the start of the body.
    #[error("API error: HTTP {status}")]
    Api { status: u16, detail: String },

    /// Success status with a body that is not JSON
    #[error("Malformed API response: {message}")]
    MalformedResponse { message: String },
}

impl FetchError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Diagnostic text kept from the response, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            FetchError::Api { detail, .. } if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Stock API request failed
    #[error("Stock API request failed: {0}. Check the Client-Id, Api-Key and network access.")]
    Fetch(#[from] FetchError),

    /// Error from the shared core
    #[error(transparent)]
    Stock(#[from] StockError),

    /// Writing the export file failed
    #[error("Export to '{path}' failed: {message}. Check the output path, permissions and free disk space.")]
    Export { path: String, message: String },

    /// Spreadsheet could not be built
    #[error("Failed to build spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// HTTP client could not be created
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or command-line flags.")]
    Config(String),

    /// Interactive prompt failed or was cancelled
    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an export error for `path`
    pub fn export(path: &Path, cause: impl std::fmt::Display) -> Self {
        Self::Export {
            path: path.display().to_string(),
            message: cause.to_string(),
        }
    }

    /// Whether this is the expected "nothing to process" outcome
    pub fn is_no_data(&self) -> bool {
        matches!(self, CliError::Stock(err) if err.is_no_data())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_detail() {
        let err = FetchError::Api {
            status: 403,
            detail: "{\"message\":\"forbidden\"}".to_string(),
        };
        assert_eq!(err.to_string(), "API error: HTTP 403");
        assert_eq!(err.detail(), Some("{\"message\":\"forbidden\"}"));

        let blank = FetchError::Api {
            status: 502,
            detail: "  ".to_string(),
        };
        assert_eq!(blank.detail(), None);
        assert_eq!(FetchError::connection("timed out").detail(), None);
    }

    #[test]
    fn test_no_data_detection() {
        let err: CliError = StockError::no_data("empty").into();
        assert!(err.is_no_data());
        assert!(!CliError::config("x").is_no_data());
    }

    #[test]
    fn test_export_error_message() {
        let err = CliError::export(Path::new("/readonly/out.xlsx"), "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("/readonly/out.xlsx"));
        assert!(msg.contains("permission denied"));
    }
}
