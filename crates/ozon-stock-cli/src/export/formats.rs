//! Export format definitions

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Prefix of generated file names
pub const FILE_PREFIX: &str = "ozon_stock_FBO";

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Excel workbook with a formatted header
    #[default]
    Xlsx,
    /// Comma-separated values, UTF-8 with BOM
    Csv,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    /// File name stamped with `now`, to the second
    pub fn default_filename<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format!(
            "{}_{}.{}",
            FILE_PREFIX,
            now.format("%Y%m%d_%H%M%S"),
            self.extension()
        )
    }

    pub fn as_str(&self) -> &'static str {
        self.extension()
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Invalid export format: {}. Valid formats: xlsx, csv", s)),
        }
    }
}
