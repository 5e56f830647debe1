//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Expense;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Place")]
    place: String,
    #[tabled(rename = "People")]
    people: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            date: e.date.format("%Y-%m-%d").to_string(),
            product: e.product.clone(),
            amount: e.price.to_string(),
            place: e.place.to_string(),
            people: e.people.clone().unwrap_or_default(),
            category: e.category.clone().unwrap_or_default(),
            id: e.id.to_string(),
        }
    }
}

/// Format expenses as a table
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut table = Table::new(expenses.iter().map(ExpenseRow::from));
    table.with(Style::psql());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Place, Price};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[]), "No expenses found.\n");
    }

    #[test]
    fn test_list_contains_fields() {
        let expense = Expense::new(
            Price::new("EUR", Money::from_cents(1999)).unwrap(),
            "Headphones",
            "Ana",
            Place::new("Lisbon", "", "FNAC"),
            NaiveDate::from_ymd_opt(2024, 7, 14).unwrap(),
            "Electronics",
        )
        .unwrap();

        let out = format_expense_list(&[expense]);

        assert!(out.contains("Product"));
        assert!(out.contains("2024-07-14"));
        assert!(out.contains("Headphones"));
        assert!(out.contains("19.99 EUR"));
        assert!(out.contains("FNAC, Lisbon"));
        assert!(out.contains("Electronics"));
    }
}
