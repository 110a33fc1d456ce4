use baseport_core::basecamp::Project;
use colored::Colorize;

use crate::basecamp::BasecampClient;
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "projects")]
#[command(about = "Project operations: ls")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all available Basecamp projects and their IDs
    #[clap(name = "ls")]
    Ls(LsOptions),
}

/// Options for listing projects
#[derive(Debug, clap::Args, Clone)]
pub struct LsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, client: &BasecampClient, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Running projects command...");
    }

    match app.command {
        Commands::Ls(options) => ls_handler(options, client).await,
    }
}

async fn ls_handler(options: LsOptions, client: &BasecampClient) -> Result<()> {
    let projects = client.list_projects().await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    println!("Rendering all available projects:\n");

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    projects_table(&projects).printstd();

    Ok(())
}

fn projects_table(projects: &[Project]) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "Name".bold().cyan(),
        "ID".bold().cyan(),
        "URL".bold().cyan()
    ]);

    for project in projects {
        table.add_row(prettytable::row![
            project.name.bright_white().to_string(),
            project.id.to_string().bright_black().to_string(),
            project.app_url
        ]);
    }

    table
}
