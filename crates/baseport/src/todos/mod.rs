pub mod export;
pub mod list;
pub mod show;

use crate::basecamp::BasecampClient;
use crate::prelude::{eprintln, *};

/// To-dos module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "todos")]
#[command(about = "To-do list operations: ls, show, export")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all available to-do lists in a project
    #[clap(name = "ls")]
    Ls(list::ListOptions),

    /// List all to-dos in one or all lists of a project
    #[clap(name = "show")]
    Show(show::ShowOptions),

    /// Export all to-dos in one or all lists into a CSV file
    #[clap(name = "export")]
    Export(export::ExportOptions),
}

/// Module entry point
pub async fn run(app: App, client: &BasecampClient, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Running todos command...");
    }

    match app.command {
        Commands::Ls(options) => list::handler(options, client).await,
        Commands::Show(options) => show::handler(options, client).await,
        Commands::Export(options) => export::handler(options, client, global).await,
    }
}
