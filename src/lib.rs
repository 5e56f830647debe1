//! expense-import - pull expenses from external sources into a local store
//!
//! Sources (a spreadsheet export, the built-in example data) produce raw
//! records; the import service normalizes each one into a validated
//! [`Expense`](models::Expense) and appends it to an expense store, reporting
//! how many records made it and how many failed.
//!
//! # Architecture
//!
//! - `config`: paths and settings, including which sources are registered
//! - `error`: error types for every layer
//! - `models`: raw imported records and the canonical expense
//! - `sources`: the source contract, its registry and concrete sources
//! - `storage`: the store contract, JSON file and in-memory stores
//! - `services`: normalization and the import run itself
//! - `display`, `cli`: terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_import::services::{ImportRequest, ImportService};
//! use expense_import::sources::SourceRegistry;
//!
//! let service = ImportService::new(SourceRegistry::from_settings(&settings), repo);
//! let report = service.import(&ImportRequest::new("sheets").bypass_wrong_expenses(true))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod sources;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult, ImportError};
