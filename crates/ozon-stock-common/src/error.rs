//! Error types for ozon-stock

use thiserror::Error;

/// Result type alias for ozon-stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Main error type shared by the workspace crates
#[derive(Error, Debug)]
pub enum StockError {
    /// Nothing to summarize or export
    #[error("No data: {0}")]
    NoData(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

impl StockError {
    /// Create a no-data error
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }

    /// Whether this error is the expected "nothing fetched" outcome
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }
}
