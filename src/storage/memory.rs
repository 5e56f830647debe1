//! In-memory expense store
//!
//! Used for `import --dry-run`: the pipeline runs unchanged but nothing
//! reaches disk.

use std::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Expense, ExpenseId};

use super::ExpenseStore;

/// Append-only store backed by a `Vec`, in append order
#[derive(Default)]
pub struct MemoryStore {
    expenses: RwLock<Vec<Expense>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far
    pub fn expenses(&self) -> Vec<Expense> {
        match self.expenses.read() {
            Ok(expenses) => expenses.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.expenses().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ExpenseStore for MemoryStore {
    fn append(&self, expense: &Expense) -> Result<ExpenseId, StoreError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| StoreError::Backend(format!("Failed to acquire lock: {}", e)))?;

        if expenses.iter().any(|e| e.id == expense.id) {
            return Err(StoreError::Duplicate(expense.id.full()));
        }
        expenses.push(expense.clone());
        Ok(expense.id)
    }
}
