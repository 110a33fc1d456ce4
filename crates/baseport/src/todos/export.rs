use std::path::PathBuf;

use baseport_core::basecamp::Todo;
use baseport_core::export::{export_todos, DEFAULT_EXPORT_PATH};
use baseport_core::transform::{transform, Profile};

use crate::basecamp::BasecampClient;
use crate::prelude::{eprintln, println, *};

/// Options for exporting to-dos
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Export every to-do list of a project:
  baseport todos export --project 12345678

  # Export one list to a custom file:
  baseport todos export --project 12345678 --list 87654321 --out backlog.csv

  # Prepare to-dos for the Zipline Jira import:
  baseport todos export --project 12345678 --formatter zipline

NOTES:
  - Formatters: default (no formatting) and zipline (you don't want this)
  - Unknown formatter names fall back to default
  - The CSV header is taken from the first to-do")]
pub struct ExportOptions {
    /// Project ID
    #[arg(short, long)]
    pub project: u64,

    /// To-do list ID; all lists in the project when omitted
    #[arg(short, long)]
    pub list: Option<u64>,

    /// Path to the output CSV file
    #[arg(short, long, default_value = DEFAULT_EXPORT_PATH)]
    pub out: PathBuf,

    /// Formatter used to preprocess exported to-dos
    #[arg(short, long, default_value = "default")]
    pub formatter: String,
}

/// Public data function - fetches and transforms to-dos for export
///
/// Comment threads are fetched only when the profile needs them.
pub async fn export_todos_data(
    client: &BasecampClient,
    project_id: u64,
    list_id: Option<u64>,
    profile: Profile,
) -> Result<Vec<Todo>> {
    let mut todos = client.fetch_todos(project_id, list_id).await?;

    log::info!("Fetched {} to-dos from project {}", todos.len(), project_id);

    if profile.needs_comments() {
        todos = client.attach_comments(project_id, todos).await?;
    }

    Ok(transform(todos, profile))
}

/// Handle the export command
pub async fn handler(
    options: ExportOptions,
    client: &BasecampClient,
    global: crate::Global,
) -> Result<()> {
    if !Profile::is_known(&options.formatter) {
        log::warn!(
            "Unknown formatter '{}', falling back to '{}'",
            options.formatter,
            Profile::Default
        );
    }
    let profile = Profile::from_name(&options.formatter);

    if global.verbose {
        eprintln!("Exporting with the '{}' formatter", profile);
    }

    let todos = export_todos_data(client, options.project, options.list, profile).await?;

    export_todos(&options.out, &todos)
        .context(f!("Failed to export to-dos to {}", options.out.display()))?;

    println!(
        "Exported {} to-dos to {}",
        todos.len(),
        options.out.display()
    );

    Ok(())
}
