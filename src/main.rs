//! Market breadth CLI application.

mod cli;

use anyhow::{Context, Result};
use breadth_config::load_config;
use breadth_monitor::setup_logging;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_deref());

    // Setup logging
    let logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or(logging.level);
    let json = cli.json_logs || logging.format == "json";
    let _guard = setup_logging(&level, json, logging.file.as_deref().map(Path::new));

    // Execute command
    let load_err = "Failed to load configuration";
    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, loaded.context(load_err)?).await,
        Commands::Fetch(args) => cli::commands::fetch::run(args, loaded.context(load_err)?).await,
        Commands::Universe => cli::commands::universe::run(&loaded.context(load_err)?).await,
        Commands::ValidateConfig => cli::commands::validate::run(cli.config.as_deref(), loaded).await,
    }
}
