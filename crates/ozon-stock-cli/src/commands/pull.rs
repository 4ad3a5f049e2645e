//! `ozon-stock pull` command implementation
//!
//! Tests the connection, fetches every FBO stock page, prints a summary and
//! exports the records.

use crate::api::StockSource;
use crate::error::{CliError, Result};
use crate::export::{self, ExportFormat};
use crate::paginator::{self, PaginationConfig};
use crate::progress::{self, format_count};
use crate::report;
use colored::Colorize;
use ozon_stock_common::summary::summarize;
use ozon_stock_common::{Credentials, StockError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Options of the pull command
#[derive(Debug, Clone, Default)]
pub struct PullOptions {
    /// Target file; a timestamped name in the working directory when unset
    pub output: Option<PathBuf>,
    pub format: ExportFormat,
    /// Report only, write no file
    pub no_export: bool,
    /// Open the exported file with the system's default application
    pub open: bool,
    /// Go straight to pagination without the one-row connection test
    pub skip_check: bool,
}

/// Fetch, summarize and export. Returns the exported file, if any.
pub async fn run<S>(
    source: &S,
    credentials: &Credentials,
    pagination: &PaginationConfig,
    options: &PullOptions,
) -> Result<Option<PathBuf>>
where
    S: StockSource + ?Sized,
{
    if !options.skip_check {
        println!("{} Testing connection...", "→".cyan());
        if let Err(err) = source.fetch_page(credentials, 1, 0).await {
            print!("{}", report::render_fetch_failure(&err));
            return Err(err.into());
        }
        println!("{} Connection successful", "✓".green());
    }

    println!("{} Fetching FBO stock...", "→".cyan());

    let spinner = progress::create_spinner("Requesting first page...");
    let session = paginator::fetch_all_with(source, credentials, pagination, |p| {
        spinner.set_message(format!(
            "Page {} (offset {}): {} rows, {} total",
            p.page,
            format_count(p.offset),
            p.rows,
            format_count(p.total as u64)
        ));
    })
    .await;
    spinner.finish_and_clear();

    print!("{}", report::render_session(&session));

    if session.is_empty() {
        return Err(match session.stop {
            paginator::StopReason::Failed(err) => CliError::Fetch(err),
            _ => StockError::no_data("the API returned no FBO stock rows").into(),
        });
    }

    println!();
    print!("{}", report::render_preview(&session.records));
    println!();

    let summary = summarize(&session.records)?;
    print!("{}", report::render_report(&summary));

    if options.no_export {
        return Ok(None);
    }

    let path = export::export(&session.records, options.output.as_deref(), options.format)?;
    print!("{}", report::render_export(&path, session.records.len(), options.format));

    if options.open {
        open_export(&path);
    }

    Ok(Some(path))
}

/// Hand the file to the desktop. Failure only warns: the export is done.
fn open_export(path: &Path) {
    match open::that(path) {
        Ok(()) => info!(path = %path.display(), "Opened export"),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not open export");
            println!("{} Could not open the file automatically: {}", "⚠".yellow().bold(), e);
        }
    }
}
