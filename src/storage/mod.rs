//! Storage layer
//!
//! Defines the [`ExpenseStore`] contract the importer persists through, and
//! two implementations: a JSON file repository with atomic writes and an
//! in-memory store for dry runs.

pub mod expenses;
pub mod file_io;
pub mod memory;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use memory::MemoryStore;

use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, StoreError};
use crate::models::{Expense, ExpenseId};

/// Durable, append-only sink for validated expenses
///
/// Appends are keyed by the expense ID. Implementations must be safe for
/// concurrent single-record appends; nothing beyond that is coordinated.
pub trait ExpenseStore: Send + Sync {
    /// Persist one expense, returning its ID once it is stored
    fn append(&self, expense: &Expense) -> Result<ExpenseId, StoreError>;
}

impl<S: ExpenseStore + ?Sized> ExpenseStore for &S {
    fn append(&self, expense: &Expense) -> Result<ExpenseId, StoreError> {
        (**self).append(expense)
    }
}

/// Open the on-disk expense repository, creating directories as needed
pub fn open(paths: &ExpensePaths) -> Result<ExpenseRepository, ExpenseError> {
    paths.ensure_directories()?;

    let repo = ExpenseRepository::new(paths.expenses_file());
    repo.load()?;
    Ok(repo)
}
