//! Field normalization for stock rows
//!
//! API versions name the same column differently. Each canonical field is
//! resolved from a primary key, then a fallback key, then a default.
//!
//! A key only counts when its value is *truthy*: `null`, `false`, `0`, `0.0`,
//! `""`, `[]` and `{}` all fall through to the next key. As a consequence a
//! row reporting `free_to_sell_amount: 0` next to `quantity: 42` yields 42.
//! Aggregated totals depend on this, so it must not be narrowed to a
//! null-only check.

use crate::types::{CanonicalRecord, RawRecord};
use serde_json::Value;

/// Key lookup order for each canonical field
pub mod keys {
    pub const PRODUCT_NAME: &[&str] = &["product_name", "item_name"];
    pub const OFFER_ID: &[&str] = &["offer_id", "item_code"];
    pub const SKU: &[&str] = &["sku"];
    pub const WAREHOUSE_NAME: &[&str] = &["warehouse_name"];
    pub const FREE_TO_SELL_AMOUNT: &[&str] = &["free_to_sell_amount", "quantity"];
    pub const RESERVED: &[&str] = &["reserved", "reserved_quantity"];
    pub const PROMISED_AMOUNT: &[&str] = &["promised_amount", "promised"];
}

/// Map one raw row to a canonical record. Never fails.
pub fn normalize(raw: &RawRecord) -> CanonicalRecord {
    CanonicalRecord {
        product_name: resolve_text(raw, keys::PRODUCT_NAME),
        offer_id: resolve_text(raw, keys::OFFER_ID),
        sku: resolve_text(raw, keys::SKU),
        warehouse_name: resolve_text(raw, keys::WAREHOUSE_NAME),
        free_to_sell_amount: resolve_count(raw, keys::FREE_TO_SELL_AMOUNT),
        reserved: resolve_count(raw, keys::RESERVED),
        promised_amount: resolve_count(raw, keys::PROMISED_AMOUNT),
    }
}

/// First truthy value among `candidates`
pub fn resolve<'a>(raw: &'a RawRecord, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| is_truthy(value))
}

fn resolve_text(raw: &RawRecord, candidates: &[&str]) -> String {
    resolve(raw, candidates).map(coerce_text).unwrap_or_default()
}

fn resolve_count(raw: &RawRecord, candidates: &[&str]) -> u64 {
    resolve(raw, candidates).map(coerce_count).unwrap_or(0)
}

/// JSON truthiness: empty, zero, false and null are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Render a value as text; strings verbatim, everything else as JSON
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a value to a non-negative count.
///
/// Floats truncate toward zero, numeric strings are parsed, negatives and
/// anything non-numeric become 0.
pub fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(count) => count,
            None => n.as_f64().map(float_to_count).unwrap_or(0),
        },
        Value::String(s) => parse_count(s),
        Value::Bool(true) => 1,
        _ => 0,
    }
}

/// Parse a count from text, same rules as [`coerce_count`]
pub fn parse_count(text: &str) -> u64 {
    let text = text.trim();
    if let Ok(count) = text.parse::<u64>() {
        return count;
    }
    text.parse::<f64>().map(float_to_count).unwrap_or(0)
}

fn float_to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        // `as` saturates at u64::MAX
        value.trunc() as u64
    } else {
        0
    }
}
