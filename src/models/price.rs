//! Price model
//!
//! A currency-tagged amount. Building one is the first step of turning a raw
//! imported row into an [`Expense`](super::Expense).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::ValidationError;

/// An amount together with the ISO-4217 style code it is expressed in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Three-letter uppercase currency code (e.g. "EUR")
    pub currency: String,

    pub amount: Money,
}

impl Price {
    /// Create a price from an already-parsed amount
    pub fn new(currency: &str, amount: Money) -> Result<Self, ValidationError> {
        Ok(Self {
            currency: normalize_currency(currency)?,
            amount,
        })
    }

    /// Create a price from the textual amount found in an import source
    pub fn parse(currency: &str, amount: &str) -> Result<Self, ValidationError> {
        let amount =
            Money::parse(amount).map_err(|_| ValidationError::InvalidAmount(amount.to_string()))?;
        Self::new(currency, amount)
    }
}

/// Trim, check and uppercase a currency code
fn normalize_currency(code: &str) -> Result<String, ValidationError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::MissingField("currency"));
    }
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidCurrency(code.to_string()));
    }
    Ok(code.to_ascii_uppercase())
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
