//! API request and response types

use ozon_stock_common::RawRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Warehouse scheme filter sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WarehouseType {
    /// Fulfilled by the marketplace
    Fbo,
}

/// Body of a stock page request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRequest {
    pub limit: u32,
    pub offset: u64,
    pub warehouse_type: WarehouseType,
}

impl StockRequest {
    /// Request for FBO warehouses, the only scheme this tool reads
    pub fn fbo(limit: u32, offset: u64) -> Self {
        Self {
            limit,
            offset,
            warehouse_type: WarehouseType::Fbo,
        }
    }
}

/// Pull the rows out of a response body.
///
/// Rows live at `result.rows`. A missing or non-array path means an empty
/// page. Rows that are not objects are kept as empty records so the page
/// size stays intact.
pub fn rows_from_body(body: Value) -> Vec<RawRecord> {
    let Value::Object(mut root) = body else {
        return Vec::new();
    };
    let Some(Value::Object(mut result)) = root.remove("result") else {
        return Vec::new();
    };
    let Some(Value::Array(rows)) = result.remove("rows") else {
        return Vec::new();
    };

    let mut skipped = 0usize;
    let records: Vec<RawRecord> = rows
        .into_iter()
        .map(|row| match row {
            Value::Object(map) => map,
            _ => {
                skipped += 1;
                RawRecord::new()
            }
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, "Stock page contained rows that are not objects");
    }

    records
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stock_request_serialization() {
        let json = serde_json::to_value(StockRequest::fbo(1000, 2000)).unwrap();
        assert_eq!(
            json,
            json!({ "limit": 1000, "offset": 2000, "warehouse_type": "FBO" })
        );
    }

    #[test]
    fn test_rows_from_body() {
        let rows = rows_from_body(json!({
            "result": {
                "rows": [
                    { "sku": 1, "warehouse_name": "A" },
                    { "sku": 2, "warehouse_name": "B" }
                ]
            }
        }));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["warehouse_name"], json!("B"));
    }

    #[test]
    fn test_rows_missing_path_is_empty() {
        assert!(rows_from_body(json!({})).is_empty());
        assert!(rows_from_body(json!({ "result": {} })).is_empty());
        assert!(rows_from_body(json!({ "result": null })).is_empty());
        assert!(rows_from_body(json!({ "result": { "rows": null } })).is_empty());
        assert!(rows_from_body(json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_non_object_rows_kept_as_empty() {
        let rows = rows_from_body(json!({ "result": { "rows": [ { "sku": 1 }, 7, "x" ] } }));
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_empty());
        assert!(rows[2].is_empty());
    }
}
