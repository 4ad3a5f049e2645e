//! CSV rendering

use super::{header, row_cells, Cell};
use ozon_stock_common::CanonicalRecord;

/// Byte order mark so spreadsheet apps detect UTF-8
const UTF8_BOM: &str = "\u{feff}";

/// Render records as CSV with a header line
pub fn render(records: &[CanonicalRecord]) -> String {
    let mut output = String::from(UTF8_BOM);

    output.push_str(&header().collect::<Vec<_>>().join(","));
    output.push('\n');

    for record in records {
        let row: Vec<String> = row_cells(record)
            .map(|cell| match cell {
                Cell::Text(text) => csv_escape(text),
                Cell::Number(n) => n.to_string(),
            })
            .collect();
        output.push_str(&row.join(","));
        output.push('\n');
    }

    output
}

/// Escape CSV value
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
