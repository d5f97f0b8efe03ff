//! CLI definitions for jobhound.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// jobhound CLI.
#[derive(Parser)]
#[command(name = "jobhound")]
#[command(about = "Scrape job listings with headless Chrome and export them")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.jobhound/config.toml, optional)
    #[arg(short, long, global = true, env = "JOBHOUND_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run one search; prompts for anything not given on the command line
    Search(SearchArgs),

    /// Serve the search form over HTTP
    Serve {
        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Job search term; prompted for when omitted
    pub term: Option<String>,

    /// Location (default: Worldwide)
    #[arg(short, long)]
    pub location: Option<String>,

    /// Number of results (default: 50)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Export file; `.csv` writes CSV directly (default: jobs.xlsx)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip writing an export file
    #[arg(long)]
    pub no_export: bool,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Load and validate the configuration
    Check,
}
