//! Ozon stock CLI library
//!
//! Command-line interface for pulling FBO warehouse stock from the Ozon
//! Seller API.
//!
//! # Overview
//!
//! - **Connection check**: one single-row request (`ozon-stock check`)
//! - **Full pull**: paginated fetch, summary and export to XLSX or CSV
//!   (`ozon-stock pull`)
//!
//! Normalization and aggregation live in `ozon-stock-common`; this crate adds
//! the HTTP client, the pagination loop, file export and terminal output.

pub mod api;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod export;
pub mod paginator;
pub mod progress;
pub mod report;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, FetchError, Result};
pub use export::ExportFormat;
pub use paginator::{fetch_all, FetchSession, PaginationConfig, StopReason};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ozon FBO stock: fetch, summarize and export warehouse balances
#[derive(Parser, Debug)]
#[command(name = "ozon-stock")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Seller API base URL
    #[arg(long, env = "OZON_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Seller client id
    #[arg(long, env = "OZON_CLIENT_ID", hide_env_values = true, global = true)]
    pub client_id: Option<String>,

    /// Seller API key
    #[arg(long, env = "OZON_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test credentials and connectivity with a single-row request
    Check,

    /// Fetch all FBO stock, print a summary and export it
    Pull {
        /// Output file (defaults to ozon_stock_FBO_<timestamp>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (xlsx, csv)
        #[arg(short, long, default_value = "xlsx")]
        format: ExportFormat,

        /// Print the summary without writing a file
        #[arg(long)]
        no_export: bool,

        /// Open the exported file when done
        #[arg(long, conflicts_with = "no_export")]
        open: bool,

        /// Skip the connection test before fetching
        #[arg(long)]
        skip_check: bool,

        /// Rows per request
        #[arg(long)]
        page_size: Option<u32>,

        /// Stop once the next offset exceeds this value
        #[arg(long)]
        max_offset: Option<u64>,
    },
}
