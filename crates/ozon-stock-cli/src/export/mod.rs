//! Stock export to tabular files
//!
//! Column order, header names and placeholders are shared by all formats.
//! Files are rendered fully in memory, written to a temporary file next to
//! the target and renamed into place, so a failed export never leaves a
//! truncated file at the target path.

pub mod csv;
pub mod formats;
pub mod xlsx;

pub use formats::ExportFormat;

use crate::error::{CliError, Result};
use chrono::Local;
use ozon_stock_common::summary::UNKNOWN_WAREHOUSE_LABEL;
use ozon_stock_common::types::FieldValue;
use ozon_stock_common::{CanonicalRecord, StockError, StockField};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Worksheet name in XLSX exports
pub const SHEET_NAME: &str = "Остатки FBO";

/// Shown instead of an empty product name, article or SKU
pub const NO_DATA_PLACEHOLDER: &str = "Нет данных";

/// Shown instead of an empty warehouse name
pub const UNKNOWN_WAREHOUSE_PLACEHOLDER: &str = UNKNOWN_WAREHOUSE_LABEL;

/// One output column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub field: StockField,
    /// Width in spreadsheet character units
    pub width: f64,
}

/// Columns in output order
pub static COLUMNS: [Column; 7] = [
    Column { field: StockField::ProductName, width: 40.0 },
    Column { field: StockField::OfferId, width: 20.0 },
    Column { field: StockField::Sku, width: 15.0 },
    Column { field: StockField::WarehouseName, width: 30.0 },
    Column { field: StockField::FreeToSellAmount, width: 15.0 },
    Column { field: StockField::Reserved, width: 15.0 },
    Column { field: StockField::PromisedAmount, width: 15.0 },
];

/// A rendered cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(u64),
}

/// Header names in column order
pub fn header() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|c| c.field.as_str())
}

/// Cells of one record in column order, placeholders applied
pub fn row_cells(record: &CanonicalRecord) -> impl Iterator<Item = Cell<'_>> {
    COLUMNS.iter().map(move |column| match record.field(column.field) {
        FieldValue::Text(text) if text.trim().is_empty() => Cell::Text(placeholder(column.field)),
        FieldValue::Text(text) => Cell::Text(text),
        FieldValue::Count(count) => Cell::Number(count),
    })
}

fn placeholder(field: StockField) -> &'static str {
    match field {
        StockField::WarehouseName => UNKNOWN_WAREHOUSE_PLACEHOLDER,
        _ => NO_DATA_PLACEHOLDER,
    }
}

/// Write `records` to `path`, or to a timestamped file in the working
/// directory when no path is given. Returns the path written.
pub fn export(records: &[CanonicalRecord], path: Option<&Path>, format: ExportFormat) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(StockError::no_data("no stock records to export").into());
    }

    let path = match path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format.default_filename(&Local::now())),
    };

    let bytes = match format {
        ExportFormat::Xlsx => xlsx::render(records)?,
        ExportFormat::Csv => csv::render(records).into_bytes(),
    };

    write_atomically(&path, &bytes)?;
    info!(path = %path.display(), rows = records.len(), format = %format, "Stock exported");

    Ok(path)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(".ozon_stock")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|e| CliError::export(path, e))?;

    file.write_all(bytes).map_err(|e| CliError::export(path, e))?;
    file.as_file().sync_all().map_err(|e| CliError::export(path, e))?;
    file.persist(path).map_err(|e| CliError::export(path, e.error))?;

    Ok(())
}
