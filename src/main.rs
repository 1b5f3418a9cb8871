mod aggregate;
mod cli;
mod commands;
mod config;
mod data_loader;
mod error;
mod format;
mod logging;
mod models;
mod state;
mod tui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::{show_daily, show_recent, show_stats};
use config::Config;
use data_loader::DataLoader;
use tui::{run_dashboard, App};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dashboard);

    // Initialize logging
    logging::init(matches!(command, Commands::Dashboard))?;

    let config = Config::load(cli.connection.url, cli.connection.key)?;
    let loader = DataLoader::new(&config);

    match command {
        Commands::Dashboard => {
            run_dashboard(App::new(loader)).await?;
        }
        Commands::Stats { json } => {
            show_stats(&loader, json).await?;
        }
        Commands::Daily { json } => {
            show_daily(&loader, json).await?;
        }
        Commands::Recent { json } => {
            show_recent(&loader, json).await?;
        }
    }

    Ok(())
}
