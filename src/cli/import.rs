//! CLI command handler for importing expenses
//!
//! Maps `expenses import` onto one [`ImportService::import`] call.

use clap::Args;

use crate::config::{ExpensePaths, Settings};
use crate::display::format_import_report;
use crate::error::ExpenseResult;
use crate::services::{ImportReport, ImportRequest, ImportService};
use crate::sources::SourceRegistry;
use crate::storage::{self, MemoryStore};

/// Arguments of the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Source identifier (see `expenses sources`)
    pub source: String,

    /// Count and skip expenses that fail instead of aborting
    /// [default: from config]
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub bypass_wrong_expenses: Option<bool>,

    /// Reserved; accepted but currently ignored
    #[arg(long)]
    pub re_import: bool,

    /// Run the import without saving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ImportArgs {
    fn request(&self, settings: &Settings) -> ImportRequest {
        ImportRequest::new(self.source.clone())
            .bypass_wrong_expenses(
                self.bypass_wrong_expenses
                    .unwrap_or(settings.bypass_wrong_expenses),
            )
            .re_import(self.re_import)
    }
}

/// Handle the import command
pub fn handle_import_command(
    paths: &ExpensePaths,
    settings: &Settings,
    args: ImportArgs,
) -> ExpenseResult<()> {
    let request = args.request(settings);
    let sources = SourceRegistry::from_settings(settings);

    let outcome = if args.dry_run {
        ImportService::new(sources, MemoryStore::new()).import(&request)
    } else {
        let repo = storage::open(paths)?;
        ImportService::new(sources, repo).import(&request)
    };

    let report: ImportReport = match outcome {
        Ok(report) => report,
        Err(e) => {
            if e.is_record_failure() && !request.bypass_wrong_expenses {
                eprintln!("Hint: pass --bypass-wrong-expenses to skip failing expenses.");
            }
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_import_report(&report, args.dry_run));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(source: &str) -> ImportArgs {
        ImportArgs {
            source: source.to_string(),
            bypass_wrong_expenses: None,
            re_import: false,
            dry_run: false,
            json: false,
        }
    }

    #[test]
    fn test_bypass_defaults_to_settings() {
        let mut settings = Settings::default();
        assert!(!args("example").request(&settings).bypass_wrong_expenses);

        settings.bypass_wrong_expenses = true;
        assert!(args("example").request(&settings).bypass_wrong_expenses);

        let mut explicit = args("example");
        explicit.bypass_wrong_expenses = Some(false);
        assert!(!explicit.request(&settings).bypass_wrong_expenses);
    }

    #[test]
    fn test_dry_run_saves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut dry = args("example");
        dry.dry_run = true;

        handle_import_command(&paths, &Settings::default(), dry).unwrap();

        assert!(!paths.expenses_file().exists());
    }

    #[test]
    fn test_import_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        handle_import_command(&paths, &Settings::default(), args("example")).unwrap();

        assert_eq!(storage::open(&paths).unwrap().count().unwrap(), 5);
    }
}
