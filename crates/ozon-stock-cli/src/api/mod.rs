//! API client module
//!
//! HTTP client for the Ozon Seller stock endpoint.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use types::*;

use crate::error::FetchError;
use async_trait::async_trait;
use ozon_stock_common::{Credentials, RawRecord};

/// Outcome of one page request
pub type PageResult = std::result::Result<Vec<RawRecord>, FetchError>;

/// Source of stock pages.
///
/// Implementations report every failure through [`PageResult`] and never
/// retry.
#[async_trait]
pub trait StockSource: Send + Sync {
    /// Fetch up to `limit` rows starting at `offset`
    async fn fetch_page(&self, credentials: &Credentials, limit: u32, offset: u64) -> PageResult;
}
