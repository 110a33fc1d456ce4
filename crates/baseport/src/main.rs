use std::path::PathBuf;

use crate::basecamp::{BasecampClient, BasecampConfig};
use crate::prelude::{eprintln, *};
use clap::Parser;

mod basecamp;
mod error;
mod prelude;
mod projects;
mod todos;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Baseport exports Basecamp 3 to-do lists to CSVs."
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Path to the Basecamp credentials file
    #[clap(long, env = "BASEPORT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "BASEPORT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Project operations: ls
    Projects(crate::projects::App),

    /// To-do list operations: ls, show, export
    Todos(crate::todos::App),
}

async fn run(app: App) -> Result<()> {
    let config = BasecampConfig::load(app.global.config.as_deref())?;
    let client = BasecampClient::new(&config)?;

    if app.global.verbose {
        eprintln!("Basecamp account: {}", config.account_url());
    }

    match app.command {
        SubCommands::Projects(sub_app) => crate::projects::run(sub_app, &client, app.global).await,
        SubCommands::Todos(sub_app) => crate::todos::run(sub_app, &client, app.global).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    if let Err(err) = run(app).await {
        if let Some(Error::AuthenticationMissing) = err.downcast_ref::<Error>() {
            eprintln!("{}", crate::basecamp::setup_guidance());
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}
