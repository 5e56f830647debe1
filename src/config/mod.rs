//! Configuration module
//!
//! - XDG-compliant path resolution
//! - Settings persistence, including which import sources are registered

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::{ExampleSourceSettings, Settings, SheetSourceSettings};
