//! CLI commands for inspecting stored expenses and configured sources

use crate::config::{ExpensePaths, Settings};
use crate::display::{format_expense_list, format_source_list};
use crate::error::ExpenseResult;
use crate::sources::SourceRegistry;
use crate::storage;

/// Print the most recent stored expenses
pub fn handle_list_command(paths: &ExpensePaths, limit: usize) -> ExpenseResult<()> {
    let repo = storage::open(paths)?;

    let mut expenses = repo.get_all()?;
    let total = expenses.len();
    expenses.truncate(limit);

    print!("{}", format_expense_list(&expenses));
    if total > expenses.len() {
        println!("... and {} more", total - expenses.len());
    }
    Ok(())
}

/// Print the sources an import can be run against
pub fn handle_sources_command(settings: &Settings) -> ExpenseResult<()> {
    let registry = SourceRegistry::from_settings(settings);
    print!("{}", format_source_list(&registry));
    Ok(())
}
