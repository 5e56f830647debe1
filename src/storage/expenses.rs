//! Expense repository for JSON storage
//!
//! Keeps every stored expense in memory and rewrites expenses.json after
//! each append, so an append that returns `Ok` is on disk. Writes happen
//! under the map's write lock, so concurrent appends are saved one at a
//! time. Each append rewrites the whole file, which makes an import of n
//! records cost O(n^2) bytes written.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};
use super::ExpenseStore;

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
}

fn lock_poisoned(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(format!("Failed to acquire lock: {}", e))
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk, replacing whatever is held in memory
    pub fn load(&self) -> Result<(), StoreError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_poisoned)?;
        data.clear();
        data.extend(file_data.expenses.into_iter().map(|e| (e.id, e)));

        Ok(())
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, StoreError> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(newest_first(&data))
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data.len())
    }

    /// Write every expense, newest first
    ///
    /// Callers hold the write lock, which keeps writers off the temp file.
    fn write_all(&self, data: &HashMap<ExpenseId, Expense>) -> Result<(), StoreError> {
        let expenses = newest_first(data);
        write_json_atomic(&self.path, &ExpenseData { expenses })
    }
}

fn newest_first(data: &HashMap<ExpenseId, Expense>) -> Vec<Expense> {
    let mut expenses: Vec<_> = data.values().cloned().collect();
    expenses.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.imported_at.cmp(&a.imported_at))
    });
    expenses
}

impl ExpenseStore for ExpenseRepository {
    fn append(&self, expense: &Expense) -> Result<ExpenseId, StoreError> {
        let mut data = self.data.write().map_err(lock_poisoned)?;
        if data.contains_key(&expense.id) {
            return Err(StoreError::Duplicate(expense.id.full()));
        }
        data.insert(expense.id, expense.clone());

        if let Err(e) = self.write_all(&data) {
            // Not on disk, so not appended
            data.remove(&expense.id);
            return Err(e);
        }

        Ok(expense.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Place, Price};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(product: &str, day: u32) -> Expense {
        Expense::new(
            Price::new("EUR", Money::from_cents(250)).unwrap(),
            product,
            "",
            Place::default(),
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            "",
        )
        .unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_append_returns_id() {
        let (_temp_dir, repo) = create_test_repo();
        let e = expense("Bread", 1);

        let id = repo.append(&e).unwrap();

        assert_eq!(id, e.id);
        assert_eq!(repo.get_all().unwrap(), vec![e]);
    }

    #[test]
    fn test_append_is_durable() {
        let (temp_dir, repo) = create_test_repo();
        let e = expense("Bread", 1);
        repo.append(&e).unwrap();

        let reopened = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        reopened.load().unwrap();

        let stored = reopened.get_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, e.id);
        assert_eq!(stored[0].product, "Bread");
    }

    #[test]
    fn test_concurrent_appends_all_saved() {
        let (temp_dir, repo) = create_test_repo();
        let repo = Arc::new(repo);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    (0..25)
                        .map(|i| repo.append(&expense(&format!("Item {}-{}", t, i), 1)))
                        .filter(Result::is_err)
                        .count()
                })
            })
            .collect();
        let failures: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(failures, 0);
        assert_eq!(repo.count().unwrap(), 200);

        let reopened = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        reopened.load().unwrap();
        assert_eq!(reopened.count().unwrap(), 200);
    }

    #[test]
    fn test_duplicate_append_rejected() {
        let (_temp_dir, repo) = create_test_repo();
        let e = expense("Bread", 1);
        repo.append(&e).unwrap();

        let err = repo.append(&e).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp_dir.path().join("expenses.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();
        let repo = ExpenseRepository::new(path);

        let err = repo.append(&expense("Bread", 1)).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(&expense("Old", 1)).unwrap();
        repo.append(&expense("New", 20)).unwrap();
        repo.append(&expense("Middle", 10)).unwrap();

        let products: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|e| e.product)
            .collect();
        assert_eq!(products, vec!["New", "Middle", "Old"]);
    }
}
