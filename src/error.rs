//! Error types for the expense importer
//!
//! Each layer has its own error enum (source, validation, store, import run)
//! and `ExpenseError` ties them together for callers that don't care which
//! layer failed.

use thiserror::Error;

/// A source could not produce its batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backing file does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// The backing data could not be read
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    /// A row could not be turned into a raw record
    #[error("Row {row}: {reason}")]
    Row { row: usize, reason: String },
}

/// A raw record failed the canonical expense constructor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Invalid currency code '{0}'")]
    InvalidCurrency(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// The store refused to persist an expense
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An expense with the same ID is already stored
    #[error("Expense already stored: {0}")]
    Duplicate(String),

    /// The backing storage failed
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Fatal outcome of one import run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Unknown importer: {0}")]
    UnknownSource(String),

    #[error("Could not import expenses from importer {source_id}: {reason}")]
    SourceUnavailable { source_id: String, reason: String },

    #[error("Failed to import expense: {product} of {amount} {currency}: {reason}")]
    ValidationFailed {
        product: String,
        amount: String,
        currency: String,
        reason: String,
    },

    #[error("Failed to save expense {expense_id} ({persisted} already saved in this run): {reason}")]
    PersistenceFailed {
        expense_id: String,
        persisted: usize,
        reason: String,
    },
}

impl ImportError {
    /// Check if the run was aborted by a single record
    pub fn is_record_failure(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed { .. } | Self::PersistenceFailed { .. }
        )
    }
}

/// The main error type for the crate
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for crate operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
