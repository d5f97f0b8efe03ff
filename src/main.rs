//! jobhound - job listing scraper
//!
//! Main entry point for the jobhound CLI and web form.

mod adapters;
mod cli;
mod cmd_config;
mod cmd_search;
mod server;
mod web;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = server::init_tracing() {
        eprintln!("Warning: logging setup incomplete: {e}");
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Search(args) => {
            let config = adapters::load_config(config_path)?;
            cmd_search::handle_search(args, config).await
        }
        Commands::Serve { host, port } => {
            let config = adapters::load_config(config_path)?;
            server::run_server(host, port, config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { action } => cmd_config::handle_config_command(action, config_path),
    }
}
