//! Service layer
//!
//! Business logic on top of the sources and the storage layer.

pub mod import;
pub mod normalize;

pub use import::{ImportReport, ImportRequest, ImportService};
pub use normalize::normalize;
