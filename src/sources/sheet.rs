//! Spreadsheet export source
//!
//! Reads the expenses sheet exported as CSV. Columns are located through a
//! [`ColumnMapping`], given explicitly or detected from the header row.
//! Amount cells are passed through untouched; only dates are parsed here.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use super::ExpenseSource;
use crate::config::SheetSourceSettings;
use crate::error::SourceError;
use crate::models::ImportedExpense;

/// Formats tried after the configured one
const FALLBACK_DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d", "%d/%m/%Y", "%d/%m/%y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y",
    "%b %d, %Y",
];

/// Column indices for each field of an imported expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub amount_column: usize,
    pub product_column: usize,
    /// Missing → the source's default currency
    pub currency_column: Option<usize>,
    pub shop_column: Option<usize>,
    pub city_column: Option<usize>,
    pub town_column: Option<usize>,
    pub people_column: Option<usize>,
    pub category_column: Option<usize>,
}

impl Default for ColumnMapping {
    /// Date, Product, Amount, Currency, Shop, City, Town, People, Category
    fn default() -> Self {
        Self {
            date_column: 0,
            product_column: 1,
            amount_column: 2,
            currency_column: Some(3),
            shop_column: Some(4),
            city_column: Some(5),
            town_column: Some(6),
            people_column: Some(7),
            category_column: Some(8),
        }
    }
}

impl ColumnMapping {
    /// Detect the mapping from a header row by keyword matching
    ///
    /// The first header matching a field wins. Fails if no date, amount or
    /// product column can be found.
    pub fn detect(headers: &StringRecord) -> Result<Self, String> {
        let mut date = None;
        let mut amount = None;
        let mut product = None;
        let mut mapping = ColumnMapping {
            currency_column: None,
            shop_column: None,
            city_column: None,
            town_column: None,
            people_column: None,
            category_column: None,
            ..ColumnMapping::default()
        };

        fn claim(slot: &mut Option<usize>, idx: usize) {
            if slot.is_none() {
                *slot = Some(idx);
            }
        }

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();
            let has = |words: &[&str]| words.iter().any(|w| h.contains(w));

            if has(&["currency"]) {
                claim(&mut mapping.currency_column, idx);
            } else if has(&["date", "day", "when"]) {
                claim(&mut date, idx);
            } else if has(&["amount", "price", "cost", "total"]) {
                claim(&mut amount, idx);
            } else if has(&["product", "item", "concept", "description"]) {
                claim(&mut product, idx);
            } else if has(&["shop", "store", "vendor", "merchant"]) {
                claim(&mut mapping.shop_column, idx);
            } else if has(&["city"]) {
                claim(&mut mapping.city_column, idx);
            } else if has(&["town", "neighbo", "district"]) {
                claim(&mut mapping.town_column, idx);
            } else if has(&["people", "payer", "paid by", "who"]) {
                claim(&mut mapping.people_column, idx);
            } else if has(&["category"]) {
                claim(&mut mapping.category_column, idx);
            }
        }

        mapping.date_column = date.ok_or("no date column in header")?;
        mapping.amount_column = amount.ok_or("no amount column in header")?;
        mapping.product_column = product.ok_or("no product column in header")?;
        Ok(mapping)
    }
}

/// Source reading a CSV export of the expenses spreadsheet
pub struct SheetSource {
    path: PathBuf,
    name: String,
    mapping: Option<ColumnMapping>,
    date_format: String,
    has_header: bool,
    delimiter: char,
    default_currency: String,
}

impl SheetSource {
    /// Create a source with default options; the mapping is detected from
    /// the header row
    pub fn new(path: impl Into<PathBuf>, default_currency: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: sheet_name(&path),
            path,
            mapping: None,
            date_format: "%Y-%m-%d".to_string(),
            has_header: true,
            delimiter: ',',
            default_currency: default_currency.into(),
        }
    }

    pub fn from_settings(settings: &SheetSourceSettings, default_currency: String) -> Self {
        Self::new(settings.path.clone(), default_currency)
            .with_date_format(&settings.date_format)
            .with_header(settings.has_header)
            .with_delimiter(settings.delimiter)
    }

    /// Use a fixed mapping instead of detecting one
    pub fn with_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV content from any reader
    pub fn parse<R: std::io::Read>(&self, input: R) -> Result<Vec<ImportedExpense>, SourceError> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| self.read_error(format!("delimiter {:?} is not ASCII", self.delimiter)))?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.has_header)
            .flexible(true)
            .from_reader(input);

        let mapping = match (&self.mapping, self.has_header) {
            (Some(mapping), _) => mapping.clone(),
            (None, true) => {
                let headers = reader
                    .headers()
                    .map_err(|e| self.read_error(e.to_string()))?;
                ColumnMapping::detect(headers).map_err(|e| self.read_error(e))?
            }
            (None, false) => ColumnMapping::default(),
        };

        // Rows are reported by their line in the file, header included
        let header_lines = usize::from(self.has_header);
        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let fallback = idx + 1 + header_lines;
            let record = result.map_err(|e| SourceError::Row {
                row: e.position().map_or(fallback, |p| p.line() as usize),
                reason: e.to_string(),
            })?;
            let row = record.position().map_or(fallback, |p| p.line() as usize);

            // Exports often end with empty rows
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            records.push(self.parse_record(&record, row, &mapping)?);
        }

        tracing::debug!(source = %self.name, rows = records.len(), "parsed sheet export");
        Ok(records)
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        row: usize,
        mapping: &ColumnMapping,
    ) -> Result<ImportedExpense, SourceError> {
        let cell = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let date_str = cell(Some(mapping.date_column));
        let date = self
            .parse_date(&date_str)
            .ok_or_else(|| SourceError::Row {
                row,
                reason: format!("Could not parse date: '{}'", date_str),
            })?;

        let currency = match cell(mapping.currency_column) {
            c if c.is_empty() => self.default_currency.clone(),
            c => c,
        };

        Ok(ImportedExpense {
            amount: cell(Some(mapping.amount_column)),
            currency,
            product: cell(Some(mapping.product_column)),
            shop: cell(mapping.shop_column),
            date,
            city: cell(mapping.city_column),
            town: cell(mapping.town_column),
            people: cell(mapping.people_column),
            category: cell(mapping.category_column),
        })
    }

    /// Try the configured format first, then common alternatives
    fn parse_date(&self, s: &str) -> Option<NaiveDate> {
        std::iter::once(self.date_format.as_str())
            .chain(FALLBACK_DATE_FORMATS)
            .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
    }

    fn read_error(&self, reason: impl Into<String>) -> SourceError {
        SourceError::Read {
            path: self.path.display().to_string(),
            reason: reason.into(),
        }
    }
}

fn sheet_name(path: &Path) -> String {
    path.file_name()
        .map(|n| format!("sheet {}", n.to_string_lossy()))
        .unwrap_or_else(|| "sheet".to_string())
}

impl ExpenseSource for SheetSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<ImportedExpense>, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.display().to_string()));
        }

        let file = std::fs::File::open(&self.path).map_err(|e| self.read_error(e.to_string()))?;
        self.parse(std::io::BufReader::new(file))
    }
}
