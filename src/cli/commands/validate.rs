//! Validate configuration command.

use anyhow::Result;
use breadth_config::{AppConfig, ConfigError};
use std::path::Path;

pub async fn run(config_path: Option<&Path>, loaded: Result<AppConfig, ConfigError>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating configuration: {}.toml (optional) + environment", breadth_config::DEFAULT_CONFIG),
    }

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Provider: {:?}", config.data.provider);
    println!("Lookback: {}", config.data.lookback);
    println!("Interval: {}", config.data.interval);
    println!("Concurrency: {}", config.data.concurrency);
    println!(
        "Universe: {} constituents vs {}",
        config.universe.tickers.len(),
        config.universe.benchmark
    );
    println!("SMA window: {}", config.analysis.sma_window);
    println!(
        "Charts: {} ({}, {}x{}, {} theme)",
        if config.charts.enabled { "enabled" } else { "disabled" },
        config.charts.format,
        config.charts.width,
        config.charts.height,
        config.charts.theme
    );

    Ok(())
}
