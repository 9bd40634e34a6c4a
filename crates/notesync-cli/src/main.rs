//! notes - command-line client for a remote notes API.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::share::run_share;
use crate::commands::shared::run_shared;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        if !error.is_reported() {
            eprintln!("Error: {error}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    // Failures already reach the user through the console notifier.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notesync_core=error".parse().expect("valid directive")),
        )
        .init();

    let Cli { command, api_url } = Cli::parse();

    match command {
        Commands::List { json } => run_list(json, api_url).await?,
        Commands::Show { id, json } => run_show(&id, json, api_url).await?,
        Commands::Shared { id, json } => run_shared(&id, json, api_url).await?,
        Commands::Add { title, content } => run_add(title, content, api_url).await?,
        Commands::Edit { id, title, content } => run_edit(&id, title, content, api_url).await?,
        Commands::Delete { id } => run_delete(&id, api_url).await?,
        Commands::Share { id } => run_share(&id, api_url).await?,
    }

    Ok(())
}
