//! Raw imported expense
//!
//! What a source hands to the importer: unvalidated labels exactly as they
//! appeared in the source. Nothing here is checked until normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedExpense {
    /// Amount as written in the source, e.g. "12.50"
    pub amount: String,
    pub currency: String,
    pub product: String,
    pub shop: String,
    pub date: NaiveDate,
    pub city: String,
    pub town: String,
    /// Payer or group label
    pub people: String,
    pub category: String,
}

impl ImportedExpense {
    /// Create a record with the fields every source provides; the rest stay blank
    pub fn new(
        product: impl Into<String>,
        amount: impl Into<String>,
        currency: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            product: product.into(),
            shop: String::new(),
            date,
            city: String::new(),
            town: String::new(),
            people: String::new(),
            category: String::new(),
        }
    }

    pub fn with_shop(mut self, shop: impl Into<String>) -> Self {
        self.shop = shop.into();
        self
    }

    pub fn with_location(mut self, city: impl Into<String>, town: impl Into<String>) -> Self {
        self.city = city.into();
        self.town = town.into();
        self
    }

    pub fn with_people(mut self, people: impl Into<String>) -> Self {
        self.people = people.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

impl fmt::Display for ImportedExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} {}", self.product, self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let raw = ImportedExpense::new("Coffee", "2.10", "EUR", date)
            .with_shop("Bar Pepe")
            .with_location("Sevilla", "Triana")
            .with_people("Both")
            .with_category("Eating out");

        assert_eq!(raw.shop, "Bar Pepe");
        assert_eq!(raw.town, "Triana");
        assert_eq!(raw.to_string(), "Coffee of 2.10 EUR");
    }
}
