//! Terminal rendering of fetch sessions, summaries and exports
//!
//! Every function returns the text to print; the commands decide where it
//! goes.

use crate::error::FetchError;
use crate::export::{ExportFormat, COLUMNS};
use crate::paginator::{FetchSession, StopReason};
use crate::progress::format_count;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use ozon_stock_common::summary::StockReport;
use ozon_stock_common::CanonicalRecord;
use std::fmt::Write as _;
use std::path::Path;

/// Records shown in the preview after fetching
pub const PREVIEW_RECORDS: usize = 2;

const FAILURE_HINTS: [&str; 3] = [
    "Client-Id and Api-Key are correct",
    "the key has access to the Seller analytics API",
    "the network connection works",
];

/// Outcome of a paginated fetch
pub fn render_session(session: &FetchSession) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} Fetched {} record(s) in {} request(s)",
        "✓".green(),
        format_count(session.records.len() as u64).bold(),
        session.requests
    );

    match &session.stop {
        StopReason::ShortPage => {
            let _ = writeln!(out, "{} Last page reached", "✓".green());
        }
        StopReason::EmptyPage => {
            let _ = writeln!(out, "{} No more data", "✓".green());
        }
        StopReason::OffsetLimit { next_offset } => {
            let _ = writeln!(
                out,
                "{} Offset limit reached before offset {}; remaining rows were not fetched",
                "⚠".yellow().bold(),
                format_count(*next_offset)
            );
        }
        StopReason::Failed(err) => {
            out.push_str(&render_fetch_failure(err));
            if !session.is_empty() {
                let _ = writeln!(
                    out,
                    "{} Continuing with the {} record(s) fetched before the failure",
                    "⚠".yellow().bold(),
                    format_count(session.records.len() as u64)
                );
            }
        }
    }

    out
}

/// A failed request with its detail and what to check
pub fn render_fetch_failure(err: &FetchError) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", "✗".red().bold(), err);
    if let Some(detail) = err.detail() {
        let _ = writeln!(out, "  Details: {}", detail);
    }
    let _ = writeln!(out, "{}", "Check that:".bold());
    for hint in FAILURE_HINTS {
        let _ = writeln!(out, "  {} {}", "→".yellow(), hint);
    }

    out
}

/// The first few records, as fetched
pub fn render_preview(records: &[CanonicalRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        return out;
    }

    let _ = writeln!(out, "{}", "Sample records:".cyan().bold());
    for (i, record) in records.iter().take(PREVIEW_RECORDS).enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, or_dash(&record.product_name));
        let _ = writeln!(out, "     Article:   {}", or_dash(&record.offer_id));
        let _ = writeln!(out, "     SKU:       {}", or_dash(&record.sku));
        let _ = writeln!(out, "     Warehouse: {}", or_dash(&record.warehouse_name));
        let _ = writeln!(out, "     Available: {}", format_count(record.free_to_sell_amount));
    }

    out
}

/// Totals, field completeness and the top warehouses
pub fn render_report(report: &StockReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Stock summary:".cyan().bold());
    let _ = writeln!(out, "  Records:    {}", format_count(report.record_count as u64));
    let _ = writeln!(out, "  Available:  {}", format_count(report.totals.quantity));
    let _ = writeln!(out, "  Reserved:   {}", format_count(report.totals.reserved));
    let _ = writeln!(out, "  Promised:   {}", format_count(report.totals.promised));
    let _ = writeln!(out, "  Warehouses: {}", report.warehouse_count());
    out.push('\n');

    let mut completeness = Table::new();
    completeness
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Field", "Filled", "%"]);
    for field in &report.completeness {
        completeness.add_row(vec![
            field.field.to_string(),
            format!("{}/{}", field.filled, field.total),
            format!("{:.1}", field.percent()),
        ]);
    }
    let _ = writeln!(out, "{}", "Field completeness:".bold());
    let _ = writeln!(out, "{}", completeness);

    if !report.top_warehouses.is_empty() {
        let mut top = Table::new();
        top.load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec!["#", "Warehouse", "Available", "Reserved", "Promised"]);
        for (i, entry) in report.top_warehouses.iter().enumerate() {
            top.add_row(vec![
                (i + 1).to_string(),
                entry.warehouse.to_string(),
                format_count(entry.totals.quantity),
                format_count(entry.totals.reserved),
                format_count(entry.totals.promised),
            ]);
        }
        let _ = writeln!(out, "{}", "Top warehouses:".bold());
        let _ = writeln!(out, "{}", top);
    }

    out
}

/// Where the export went and how its columns are laid out
pub fn render_export(path: &Path, rows: usize, format: ExportFormat) -> String {
    let mut out = String::new();
    let shown = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    let _ = writeln!(out, "{} Export completed", "✓".green().bold());
    let _ = writeln!(out, "  File: {}", shown.display().to_string().cyan());
    let _ = writeln!(out, "  Rows: {}", format_count(rows as u64));

    if format == ExportFormat::Xlsx {
        let _ = writeln!(out, "  Columns:");
        for (letter, column) in ('A'..='Z').zip(COLUMNS.iter()) {
            let _ = writeln!(out, "    {}: {}", letter, column.field);
        }
    }

    out
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}
