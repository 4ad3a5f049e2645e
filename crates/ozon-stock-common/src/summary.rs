//! Summary statistics over a fetched record set

use crate::error::{Result, StockError};
use crate::types::{CanonicalRecord, FieldValue, StockField};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Number of warehouses listed in [`StockReport::top_warehouses`]
pub const TOP_WAREHOUSES: usize = 5;

/// Label shown for rows without a warehouse name
pub const UNKNOWN_WAREHOUSE_LABEL: &str = "Неизвестный склад";

/// Quantity, reserved and promised totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockTotals {
    pub quantity: u64,
    pub reserved: u64,
    pub promised: u64,
}

impl StockTotals {
    fn add(&mut self, record: &CanonicalRecord) {
        self.quantity = self.quantity.saturating_add(record.free_to_sell_amount);
        self.reserved = self.reserved.saturating_add(record.reserved);
        self.promised = self.promised.saturating_add(record.promised_amount);
    }
}

/// Grouping key for warehouses.
///
/// Blank names get their own bucket so they never merge with a real
/// warehouse, whatever that warehouse is called.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WarehouseKey {
    Named(String),
    Unknown,
}

impl WarehouseKey {
    pub fn from_name(name: &str) -> Self {
        if name.trim().is_empty() {
            WarehouseKey::Unknown
        } else {
            WarehouseKey::Named(name.to_string())
        }
    }
}

/// Serialized as its display label, so `Unknown` stays readable
impl Serialize for WarehouseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl std::fmt::Display for WarehouseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarehouseKey::Named(name) => write!(f, "{}", name),
            WarehouseKey::Unknown => write!(f, "{}", UNKNOWN_WAREHOUSE_LABEL),
        }
    }
}

/// Totals for one warehouse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarehouseSummary {
    pub warehouse: WarehouseKey,
    pub totals: StockTotals,
}

/// Share of records with a non-blank value in one text field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCompleteness {
    pub field: &'static str,
    pub filled: usize,
    pub total: usize,
}

impl FieldCompleteness {
    /// Fraction in `[0, 1]`
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.filled as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}

/// Aggregated view of a non-empty record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReport {
    pub record_count: usize,
    pub totals: StockTotals,
    /// Per-warehouse totals in first-appearance order
    pub warehouses: Vec<WarehouseSummary>,
    pub completeness: Vec<FieldCompleteness>,
    /// Up to [`TOP_WAREHOUSES`] entries by quantity, descending
    pub top_warehouses: Vec<WarehouseSummary>,
}

impl StockReport {
    pub fn warehouse_count(&self) -> usize {
        self.warehouses.len()
    }

    /// Totals for one warehouse by key
    pub fn warehouse(&self, key: &WarehouseKey) -> Option<&StockTotals> {
        self.warehouses
            .iter()
            .find(|w| &w.warehouse == key)
            .map(|w| &w.totals)
    }
}

/// Compute totals, the warehouse breakdown and field completeness.
///
/// An empty record set is reported as [`StockError::NoData`] rather than as
/// a report full of zeros.
pub fn summarize(records: &[CanonicalRecord]) -> Result<StockReport> {
    if records.is_empty() {
        return Err(StockError::no_data("no stock records to analyze"));
    }

    let mut totals = StockTotals::default();
    let mut warehouses: Vec<WarehouseSummary> = Vec::new();
    let mut index: HashMap<WarehouseKey, usize> = HashMap::new();

    for record in records {
        totals.add(record);

        let key = WarehouseKey::from_name(&record.warehouse_name);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                warehouses.push(WarehouseSummary {
                    warehouse: key.clone(),
                    totals: StockTotals::default(),
                });
                index.insert(key, warehouses.len() - 1);
                warehouses.len() - 1
            }
        };
        warehouses[slot].totals.add(record);
    }

    let completeness = StockField::TEXT
        .iter()
        .map(|&field| FieldCompleteness {
            field: field.as_str(),
            filled: records.iter().filter(|r| is_filled(r, field)).count(),
            total: records.len(),
        })
        .collect();

    // sort_by is stable: equal quantities keep first-appearance order
    let mut top_warehouses = warehouses.clone();
    top_warehouses.sort_by(|a, b| b.totals.quantity.cmp(&a.totals.quantity));
    top_warehouses.truncate(TOP_WAREHOUSES);

    Ok(StockReport {
        record_count: records.len(),
        totals,
        warehouses,
        completeness,
        top_warehouses,
    })
}

fn is_filled(record: &CanonicalRecord, field: StockField) -> bool {
    match record.field(field) {
        FieldValue::Text(text) => !text.trim().is_empty(),
        FieldValue::Count(_) => true,
    }
}
