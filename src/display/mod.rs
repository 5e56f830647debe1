//! Display formatting for terminal output

pub mod expense;
pub mod report;

pub use expense::format_expense_list;
pub use report::{format_import_report, format_source_list};
