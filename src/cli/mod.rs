//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod expense;
pub mod import;

pub use expense::{handle_list_command, handle_sources_command};
pub use import::{handle_import_command, ImportArgs};
