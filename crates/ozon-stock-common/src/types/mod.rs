//! Common types used across ozon-stock

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};

/// One row of an API page, as returned by the server.
///
/// Key names differ between API versions (`product_name` vs `item_name`), so
/// rows are kept untyped until they go through [`crate::normalize`].
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Normalized stock row for one SKU in one warehouse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Display name, possibly empty
    pub product_name: String,
    /// Seller-assigned article
    pub offer_id: String,
    /// Platform-assigned numeric identifier, kept as text
    pub sku: String,
    pub warehouse_name: String,
    pub free_to_sell_amount: u64,
    pub reserved: u64,
    pub promised_amount: u64,
}

/// Fields of [`CanonicalRecord`], in export column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockField {
    ProductName,
    OfferId,
    Sku,
    WarehouseName,
    FreeToSellAmount,
    Reserved,
    PromisedAmount,
}

impl StockField {
    /// All fields in the fixed column order
    pub const ALL: [StockField; 7] = [
        StockField::ProductName,
        StockField::OfferId,
        StockField::Sku,
        StockField::WarehouseName,
        StockField::FreeToSellAmount,
        StockField::Reserved,
        StockField::PromisedAmount,
    ];

    /// Text fields checked for completeness
    pub const TEXT: [StockField; 4] = [
        StockField::ProductName,
        StockField::OfferId,
        StockField::Sku,
        StockField::WarehouseName,
    ];

    /// Field name as used in API payloads and export headers
    pub fn as_str(&self) -> &'static str {
        match self {
            StockField::ProductName => "product_name",
            StockField::OfferId => "offer_id",
            StockField::Sku => "sku",
            StockField::WarehouseName => "warehouse_name",
            StockField::FreeToSellAmount => "free_to_sell_amount",
            StockField::Reserved => "reserved",
            StockField::PromisedAmount => "promised_amount",
        }
    }
}

impl std::fmt::Display for StockField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single cell of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Count(u64),
}

impl CanonicalRecord {
    /// Borrow one field by name
    pub fn field(&self, field: StockField) -> FieldValue<'_> {
        match field {
            StockField::ProductName => FieldValue::Text(&self.product_name),
            StockField::OfferId => FieldValue::Text(&self.offer_id),
            StockField::Sku => FieldValue::Text(&self.sku),
            StockField::WarehouseName => FieldValue::Text(&self.warehouse_name),
            StockField::FreeToSellAmount => FieldValue::Count(self.free_to_sell_amount),
            StockField::Reserved => FieldValue::Count(self.reserved),
            StockField::PromisedAmount => FieldValue::Count(self.promised_amount),
        }
    }
}

/// Seller API credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    api_key: String,
}

impl Credentials {
    /// Build credentials, rejecting blank values.
    ///
    /// Surrounding whitespace is trimmed.
    pub fn new(client_id: impl AsRef<str>, api_key: impl AsRef<str>) -> Result<Self> {
        let client_id = client_id.as_ref().trim();
        let api_key = api_key.as_ref().trim();

        if client_id.is_empty() {
            return Err(StockError::InvalidCredentials(
                "Client-Id must not be empty".to_string(),
            ));
        }
        if api_key.is_empty() {
            return Err(StockError::InvalidCredentials(
                "Api-Key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client_id: client_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("api_key", &"***")
            .finish()
    }
}
