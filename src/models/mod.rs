//! Core data models
//!
//! Raw records as produced by import sources, and the validated expense
//! records they are normalized into.

pub mod expense;
pub mod ids;
pub mod imported;
pub mod money;
pub mod place;
pub mod price;

pub use expense::Expense;
pub use ids::{ExpenseId, RunId};
pub use imported::ImportedExpense;
pub use money::Money;
pub use place::Place;
pub use price::Price;
