//! Universe listing command.

use anyhow::Result;
use breadth_config::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let universe = &config.universe;

    println!("Benchmark: {}", universe.benchmark);
    println!("Constituents ({}):", universe.tickers.len());
    for row in universe.tickers.chunks(10) {
        println!("  {}", row.join("  "));
    }

    Ok(())
}
