//! User settings
//!
//! Declares which import sources are registered and how they read their
//! data, plus import defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Settings for the built-in example source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSourceSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Label the example source reports as its name
    #[serde(default = "default_example_name")]
    pub name: String,
}

impl Default for ExampleSourceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            name: default_example_name(),
        }
    }
}

/// Settings for the spreadsheet export source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSourceSettings {
    /// CSV export of the expenses sheet
    pub path: PathBuf,

    /// Primary date format (strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Whether the first row holds column names
    #[serde(default = "default_true")]
    pub has_header: bool,

    /// Currency used when the sheet has no currency column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl SheetSourceSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            date_format: default_date_format(),
            delimiter: default_delimiter(),
            has_header: true,
            currency: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency assumed by sources that don't carry one
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Default for `--bypass-wrong-expenses` when the flag isn't given
    #[serde(default)]
    pub bypass_wrong_expenses: bool,

    #[serde(default)]
    pub example: ExampleSourceSettings,

    /// Spreadsheet source; not registered when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheets: Option<SheetSourceSettings>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_example_name() -> String {
    "example data".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_delimiter() -> char {
    ','
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: default_currency(),
            bypass_wrong_expenses: false,
            example: ExampleSourceSettings::default(),
            sheets: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
