//! Example source
//!
//! Serves a fixed set of expenses. Handy for trying the importer out and for
//! checking a fresh installation end to end.

use chrono::NaiveDate;

use super::ExpenseSource;
use crate::error::SourceError;
use crate::models::ImportedExpense;

pub struct ExampleSource {
    name: String,
}

impl ExampleSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

fn day(year: i32, month: u32, day: u32) -> Result<NaiveDate, SourceError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| SourceError::Row {
        row: 0,
        reason: format!("invalid example date {}-{}-{}", year, month, day),
    })
}

impl ExpenseSource for ExampleSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<ImportedExpense>, SourceError> {
        Ok(vec![
            ImportedExpense::new("Weekly groceries", "42.30", "EUR", day(2024, 1, 5)?)
                .with_shop("Mercado Central")
                .with_location("Valencia", "Ciutat Vella")
                .with_people("Household")
                .with_category("Food"),
            ImportedExpense::new("Train ticket", "18.90", "EUR", day(2024, 1, 8)?)
                .with_shop("Renfe")
                .with_location("Madrid", "Atocha")
                .with_people("Ana")
                .with_category("Transport"),
            ImportedExpense::new("Coffee beans", "12.00", "EUR", day(2024, 1, 12)?)
                .with_shop("Tostadores")
                .with_location("Valencia", "Ruzafa")
                .with_people("Household")
                .with_category("Food"),
            ImportedExpense::new("Paperback", "24.99", "USD", day(2024, 2, 2)?)
                .with_shop("Powell's Books")
                .with_location("Portland", "Pearl District")
                .with_people("Luis")
                .with_category("Leisure"),
            ImportedExpense::new("Dinner", "67.40", "USD", day(2024, 2, 3)?)
                .with_shop("Andina")
                .with_location("Portland", "Pearl District")
                .with_people("Ana, Luis")
                .with_category("Eating out"),
        ])
    }
}
