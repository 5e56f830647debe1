use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use expense_import::cli::{
    handle_import_command, handle_list_command, handle_sources_command, ImportArgs,
};
use expense_import::config::{ExpensePaths, Settings};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "EXPENSES_LOG";

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Import expenses from spreadsheet exports into a local expense store"
)]
struct Cli {
    /// Log more (-v info, -vv debug); EXPENSES_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import all expenses from a source
    Import(ImportArgs),

    /// List configured import sources
    Sources,

    /// List stored expenses, newest first
    List {
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Write the default configuration file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Import(args)) => handle_import_command(&paths, &settings, args)?,
        Some(Commands::Sources) => handle_sources_command(&settings)?,
        Some(Commands::List { limit }) => handle_list_command(&paths, limit)?,
        Some(Commands::Init) => {
            if paths.settings_file().exists() {
                println!("Already initialized: {}", paths.settings_file().display());
            } else {
                settings.save(&paths)?;
                println!("Wrote {}", paths.settings_file().display());
                println!("Add a \"sheets\" section to import from a spreadsheet export.");
            }
        }
        Some(Commands::Config) => {
            println!("Expense Import Configuration");
            println!("============================");
            println!("Config file:   {}", paths.settings_file().display());
            println!("Expense store: {}", paths.expenses_file().display());
            println!();
            println!("Settings:");
            println!("  Default currency:      {}", settings.default_currency);
            println!("  Bypass wrong expenses: {}", settings.bypass_wrong_expenses);
            println!(
                "  Example source:        {}",
                if settings.example.enabled { "enabled" } else { "disabled" }
            );
            match &settings.sheets {
                Some(sheets) => println!("  Sheet export:          {}", sheets.path.display()),
                None => println!("  Sheet export:          not configured"),
            }
        }
        None => {
            println!("expenses - import expenses into a local store");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses import example' to try it out.");
        }
    }

    Ok(())
}
