//! XLSX rendering

use super::{header, row_cells, Cell, COLUMNS, SHEET_NAME};
use crate::error::Result;
use ozon_stock_common::CanonicalRecord;
use rust_xlsxwriter::{Format, Workbook};

/// Largest count an XLSX number cell holds exactly (2^53)
pub const MAX_EXACT_COUNT: u64 = 1 << 53;

/// Render a single-sheet workbook with a bold header row
pub fn render(records: &[CanonicalRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in header().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &bold)?;
    }
    for (col, column) in COLUMNS.iter().enumerate() {
        sheet.set_column_width(col as u16, column.width)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, cell) in row_cells(record).enumerate() {
            match cell {
                Cell::Text(text) => sheet.write_string(row, col as u16, text)?,
                Cell::Number(n) if n <= MAX_EXACT_COUNT => sheet.write_number(row, col as u16, n as f64)?,
                // Cells are IEEE doubles; larger counts are kept exact as text
                Cell::Number(n) => sheet.write_string(row, col as u16, n.to_string())?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}
