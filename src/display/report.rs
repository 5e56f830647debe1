//! Import report and source listing formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::ImportReport;
use crate::sources::SourceRegistry;

/// Format the outcome of an import run
pub fn format_import_report(report: &ImportReport, dry_run: bool) -> String {
    let mut output = String::new();

    let title = if dry_run {
        "Import Complete (dry run, nothing saved)"
    } else {
        "Import Complete!"
    };
    output.push_str(title);
    output.push('\n');
    output.push_str(&format!("  Imported:    {}\n", report.successful_imports));
    output.push_str(&format!("  Failed:      {}\n", report.failed_imports));
    if let Some(message) = &report.message {
        output.push_str(&format!("  {}\n", message));
    }
    if let Some(run_id) = &report.run_id {
        output.push_str(&format!("  Run:         {}\n", run_id));
    }

    output
}

#[derive(Tabled)]
struct SourceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// Format the registered sources as a table
pub fn format_source_list(registry: &SourceRegistry) -> String {
    if registry.is_empty() {
        return "No import sources configured.\n".to_string();
    }

    let rows = registry.iter().map(|(id, source)| SourceRow {
        id: id.to_string(),
        name: source.name().to_string(),
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}
