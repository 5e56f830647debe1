//! Expense model
//!
//! The canonical, storable form of one expense. [`Expense::new`] is the only
//! way to build one and is where imported data gets validated.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::place::{non_blank, Place};
use super::price::Price;
use crate::error::ValidationError;

/// A validated expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, assigned on construction
    pub id: ExpenseId,

    pub price: Price,

    /// What was bought
    pub product: String,

    /// Who paid, or the group the expense belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<String>,

    #[serde(default)]
    pub place: Place,

    /// When the expense happened
    pub date: NaiveDate,

    /// Category label as given by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// When this record was built from imported data
    pub imported_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense, validating the free-text fields
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if the product is blank.
    pub fn new(
        price: Price,
        product: &str,
        people: &str,
        place: Place,
        date: NaiveDate,
        category: &str,
    ) -> Result<Self, ValidationError> {
        let product = non_blank(product).ok_or(ValidationError::MissingField("product"))?;

        Ok(Self {
            id: ExpenseId::new(),
            price,
            product,
            people: non_blank(people),
            place,
            date,
            category: non_blank(category),
            imported_at: Utc::now(),
        })
    }

    /// Compare everything except the generated identifier and timestamp
    pub fn same_content(&self, other: &Expense) -> bool {
        self.price == other.price
            && self.product == other.product
            && self.people == other.people
            && self.place == other.place
            && self.date == other.date
            && self.category == other.category
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.product,
            self.price
        )
    }
}
