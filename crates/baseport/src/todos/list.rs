use baseport_core::basecamp::TodoList;
use colored::Colorize;
use serde::Serialize;

use crate::basecamp::BasecampClient;
use crate::prelude::{println, *};

/// Options for listing to-do lists
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Find project IDs first:
  baseport projects ls

  # List the to-do lists of a project:
  baseport todos ls --project 12345678")]
pub struct ListOptions {
    /// Project ID
    #[arg(short, long)]
    pub project: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Output structure for the ls command
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub project: String,
    pub lists: Vec<TodoList>,
}

/// Public data function - fetches the to-do lists of a project
pub async fn list_todolists_data(client: &BasecampClient, project_id: u64) -> Result<ListOutput> {
    let project = client.get_project(project_id).await?;
    let lists = client.list_todolists(&project).await?;

    Ok(ListOutput {
        project: project.name,
        lists,
    })
}

/// Handle the ls command
pub async fn handler(options: ListOptions, client: &BasecampClient) -> Result<()> {
    let data = list_todolists_data(client, options.project).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("To-do lists in {}:\n", data.project.bold());

    if data.lists.is_empty() {
        println!("No to-do lists found.");
        return Ok(());
    }

    lists_table(&data.lists).printstd();

    Ok(())
}

fn lists_table(lists: &[TodoList]) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "Name".bold().cyan(),
        "ID".bold().cyan(),
        "Done".bold().cyan(),
        "URL".bold().cyan()
    ]);

    for list in lists {
        let done = list.completed_ratio.as_deref().unwrap_or("-");
        table.add_row(prettytable::row![
            list.display_name(),
            list.id,
            done.green().to_string(),
            list.app_url
        ]);
    }

    table
}
