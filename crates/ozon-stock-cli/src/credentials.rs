//! Credential resolution
//!
//! Flags and environment variables are resolved by clap. Whatever is still
//! missing is prompted for when stdin is a terminal.

use crate::error::{CliError, Result};
use inquire::validator::ValueRequiredValidator;
use inquire::{Password, PasswordDisplayMode, Text};
use ozon_stock_common::Credentials;
use std::io::IsTerminal;
use tracing::debug;

/// Build credentials from the given values, prompting for missing ones
pub fn resolve_credentials(client_id: Option<String>, api_key: Option<String>) -> Result<Credentials> {
    let interactive = std::io::stdin().is_terminal();
    resolve_with(client_id, api_key, interactive)
}

fn resolve_with(client_id: Option<String>, api_key: Option<String>, interactive: bool) -> Result<Credentials> {
    let client_id = match present(client_id) {
        Some(value) => value,
        None if interactive => prompt_client_id()?,
        None => return Err(missing("client id", "--client-id", "OZON_CLIENT_ID")),
    };

    let api_key = match present(api_key) {
        Some(value) => value,
        None if interactive => prompt_api_key()?,
        None => return Err(missing("API key", "--api-key", "OZON_API_KEY")),
    };

    let credentials = Credentials::new(client_id, api_key)?;
    debug!(?credentials, "Credentials resolved");
    Ok(credentials)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing(what: &str, flag: &str, env: &str) -> CliError {
    CliError::config(format!("{} is not set; pass {} or set {}", what, flag, env))
}

fn prompt_client_id() -> Result<String> {
    Ok(Text::new("Client-Id:")
        .with_help_message("Seller account > Settings > API keys")
        .with_validator(ValueRequiredValidator::default())
        .prompt()?)
}

fn prompt_api_key() -> Result<String> {
    Ok(Password::new("Api-Key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(ValueRequiredValidator::default())
        .prompt()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ozon_stock_common::StockError;

    #[test]
    fn test_resolve_from_values() {
        let creds = resolve_with(Some(" 42 ".to_string()), Some("secret".to_string()), false).unwrap();
        assert_eq!(creds.client_id(), "42");
        assert_eq!(creds.api_key(), "secret");
    }

    #[test]
    fn test_missing_values_without_terminal() {
        let err = resolve_with(None, Some("secret".to_string()), false).unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("OZON_CLIENT_ID")));

        let err = resolve_with(Some("42".to_string()), Some("   ".to_string()), false).unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("OZON_API_KEY")));
    }

    #[test]
    fn test_blank_values_rejected_by_core() {
        let err = Credentials::new("", "secret").unwrap_err();
        assert!(matches!(err, StockError::InvalidCredentials(_)));
    }
}
