//! ozon-stock Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and the pure core of the stock pipeline.
//!
//! # Overview
//!
//! - **Types**: raw API rows, canonical stock records, credentials
//! - **Normalization**: mapping raw rows to canonical records with field
//!   fallback
//! - **Summary**: totals, per-warehouse breakdown and field completeness
//! - **Error Handling**: shared error and result types
//! - **Logging**: `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use ozon_stock_common::normalize::normalize;
//! use ozon_stock_common::summary::summarize;
//! use ozon_stock_common::types::RawRecord;
//!
//! let row: RawRecord = serde_json::from_str(
//!     r#"{"item_name": "Mug", "warehouse_name": "Tver", "quantity": 3}"#,
//! ).unwrap();
//! let report = summarize(&[normalize(&row)]).unwrap();
//! assert_eq!(report.totals.quantity, 3);
//! ```

pub mod error;
pub mod logging;
pub mod normalize;
pub mod summary;
pub mod types;

// Re-export commonly used types
pub use error::{Result, StockError};
pub use types::{CanonicalRecord, Credentials, RawRecord, StockField};
