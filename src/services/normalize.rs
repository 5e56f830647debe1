//! Record normalization
//!
//! Turns a raw imported expense into a validated [`Expense`]. Pure: the same
//! input always gives the same outcome, only the generated ID differs.

use crate::error::ValidationError;
use crate::models::{Expense, ImportedExpense, Place, Price};

/// Normalize one raw record
pub fn normalize(raw: &ImportedExpense) -> Result<Expense, ValidationError> {
    let price = Price::parse(&raw.currency, &raw.amount)?;
    let place = Place::new(&raw.city, &raw.town, &raw.shop);

    Expense::new(
        price,
        &raw.product,
        &raw.people,
        place,
        raw.date,
        &raw.category,
    )
}
