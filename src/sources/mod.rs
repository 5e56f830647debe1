//! Import sources
//!
//! A source produces the full batch of raw expenses available from one
//! origin. Sources are registered under an identifier in a
//! [`SourceRegistry`], which is what the importer looks them up in.

pub mod example;
pub mod sheet;

pub use example::ExampleSource;
pub use sheet::{ColumnMapping, SheetSource};

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::error::{ImportError, SourceError};
use crate::models::ImportedExpense;

/// Identifier the example source is registered under
pub const EXAMPLE_SOURCE_ID: &str = "example";
/// Identifier the spreadsheet source is registered under
pub const SHEETS_SOURCE_ID: &str = "sheets";

/// An origin of raw expense data
pub trait ExpenseSource: Send + Sync {
    /// Human-readable label, used in logs and listings
    fn name(&self) -> &str;

    /// Return every record currently available
    ///
    /// An error means the source as a whole is unavailable.
    fn fetch(&self) -> Result<Vec<ImportedExpense>, SourceError>;
}

/// Sources keyed by identifier
#[derive(Default)]
pub struct SourceRegistry {
    sources: BTreeMap<String, Box<dyn ExpenseSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry described by the settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut registry = Self::new();

        if settings.example.enabled {
            registry.register(
                EXAMPLE_SOURCE_ID,
                ExampleSource::new(settings.example.name.clone()),
            );
        }

        if let Some(sheets) = &settings.sheets {
            let currency = sheets
                .currency
                .clone()
                .unwrap_or_else(|| settings.default_currency.clone());
            registry.register(
                SHEETS_SOURCE_ID,
                SheetSource::from_settings(sheets, currency),
            );
        }

        registry
    }

    /// Register a source, replacing any source already under `id`
    pub fn register(&mut self, id: impl Into<String>, source: impl ExpenseSource + 'static) {
        self.sources.insert(id.into(), Box::new(source));
    }

    /// Look up a source by identifier
    pub fn get(&self, id: &str) -> Result<&dyn ExpenseSource, ImportError> {
        self.sources
            .get(id)
            .map(|s| s.as_ref())
            .ok_or_else(|| ImportError::UnknownSource(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    /// Registered identifiers with their source names, sorted by identifier
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn ExpenseSource)> {
        self.sources.iter().map(|(id, s)| (id.as_str(), s.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
