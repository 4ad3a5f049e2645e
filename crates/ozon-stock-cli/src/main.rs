//! ozon-stock - Main entry point

use clap::Parser;
use ozon_stock_cli::api::ApiClient;
use ozon_stock_cli::commands::{self, pull::PullOptions};
use ozon_stock_cli::credentials::resolve_credentials;
use ozon_stock_cli::{Cli, Commands, Config};
use ozon_stock_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // .env values must be visible before clap reads env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Verbose: debug to console. Otherwise warnings only.
    let base = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .build();

    // LOG_* variables take precedence; a bad value falls back to the flags
    let log_config = match base.clone().merge_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: ignoring invalid logging environment: {}", e);
            base
        }
    };

    // The CLI works without logging, so a failed init is not fatal
    let _guard = match init_logging(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> ozon_stock_cli::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(url) = &cli.api_url {
        config.set_api_url(url.clone());
    }
    if let Commands::Pull {
        page_size,
        max_offset,
        ..
    } = &cli.command
    {
        if let Some(size) = page_size {
            config.set_page_size(*size);
        }
        if let Some(max_offset) = max_offset {
            config.set_max_offset(*max_offset);
        }
    }
    config.validate()?;

    let credentials = resolve_credentials(cli.client_id.clone(), cli.api_key.clone())?;
    let client = ApiClient::from_config(&config)?;

    match &cli.command {
        Commands::Check => commands::check::run(&client, &credentials).await,

        Commands::Pull {
            output,
            format,
            no_export,
            open,
            skip_check,
            ..
        } => {
            let options = PullOptions {
                output: output.clone(),
                format: *format,
                no_export: *no_export,
                open: *open,
                skip_check: *skip_check,
            };
            commands::pull::run(&client, &credentials, &config.pagination()?, &options)
                .await
                .map(|_| ())
        }
    }
}
