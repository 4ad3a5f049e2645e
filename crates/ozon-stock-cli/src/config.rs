//! Configuration management for the ozon-stock CLI
//!
//! Defaults, overlaid by environment variables, overlaid by command-line
//! flags.

use crate::error::{CliError, Result};
use crate::paginator::PaginationConfig;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Seller API base URL when not overridden
pub const DEFAULT_API_URL: &str = "https://api-seller.ozon.ru";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Rows requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Pagination stops once the next offset would exceed this value
pub const DEFAULT_MAX_OFFSET: u64 = 50_000;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
    pub max_offset: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            max_offset: DEFAULT_MAX_OFFSET,
        }
    }
}

impl Config {
    /// Load config from environment variables
    ///
    /// - `OZON_API_URL`
    /// - `OZON_API_TIMEOUT_SECS`
    /// - `OZON_PAGE_SIZE`
    /// - `OZON_MAX_OFFSET`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("OZON_API_URL") {
            config.api_url = url;
        }
        if let Some(timeout) = env_number("OZON_API_TIMEOUT_SECS")? {
            config.timeout_secs = timeout;
        }
        if let Some(size) = env_number("OZON_PAGE_SIZE")? {
            config.page_size = size;
        }
        if let Some(max_offset) = env_number("OZON_MAX_OFFSET")? {
            config.max_offset = max_offset;
        }

        Ok(config)
    }

    pub fn set_api_url(&mut self, url: impl Into<String>) {
        self.api_url = url.into();
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size;
    }

    pub fn set_max_offset(&mut self, max_offset: u64) {
        self.max_offset = max_offset;
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject values the fetch loop cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(CliError::config("API URL must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::config("request timeout must be at least 1 second"));
        }
        if self.page_size == 0 {
            return Err(CliError::config("page size must be greater than zero"));
        }
        Ok(())
    }

    /// Paging parameters for [`crate::paginator::fetch_all`]
    pub fn pagination(&self) -> Result<PaginationConfig> {
        let page_size = NonZeroU32::new(self.page_size)
            .ok_or_else(|| CliError::config("page size must be greater than zero"))?;
        Ok(PaginationConfig::new(page_size, self.max_offset))
    }
}

fn env_number<T: FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CliError::config(format!("{} must be a non-negative integer, got '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.max_offset, 50_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("OZON_API_TIMEOUT_SECS", "45");
        std::env::set_var("OZON_MAX_OFFSET", " 20000 ");

        let config = Config::from_env().unwrap();
        assert_eq!(config.timeout_secs, 45);
        assert_eq!(config.max_offset, 20_000);

        std::env::set_var("OZON_MAX_OFFSET", "lots");
        assert!(Config::from_env().is_err());

        std::env::remove_var("OZON_API_TIMEOUT_SECS");
        std::env::remove_var("OZON_MAX_OFFSET");
    }

    #[test]
    fn test_config_setters_and_validation() {
        let mut config = Config::default();

        config.set_api_url("http://127.0.0.1:8080");
        config.set_max_offset(3000);
        config.set_page_size(250);
        assert_eq!(config.api_url, "http://127.0.0.1:8080");

        let pagination = config.pagination().unwrap();
        assert_eq!(pagination.page_size().get(), 250);
        assert_eq!(pagination.max_offset(), 3000);

        config.set_page_size(0);
        assert!(config.validate().is_err());
        assert!(config.pagination().is_err());
    }
}
