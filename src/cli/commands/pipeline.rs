//! Price acquisition shared by the data commands.

use anyhow::{Context, Result};
use breadth_config::{AppConfig, Provider};
use breadth_data::{
    fetch_universe, CsvDataSource, FetchOutcome, FetchRequest, PriceCache, YahooConfig, YahooSource,
};
use std::time::Duration;
use tracing::{info, warn};

/// Retrieve closes for the universe and benchmark from the configured provider.
pub async fn acquire(config: &AppConfig, refresh: bool) -> Result<FetchOutcome> {
    let request = FetchRequest {
        symbols: config.universe.all_symbols(),
        interval: config.data.interval()?,
        lookback: config.data.lookback()?,
        concurrency: config.data.concurrency,
    };

    info!(
        symbols = request.symbols.len(),
        lookback = %request.lookback,
        interval = %request.interval,
        "Acquiring data"
    );

    let outcome = match config.data.provider {
        Provider::Csv => {
            let path = config
                .data
                .csv_path
                .as_deref()
                .context("data.csv_path is not set")?;
            let source = CsvDataSource::new(path)
                .with_context(|| format!("Cannot open price data at '{}'", path))?;
            fetch_universe(&source, &request, None).await?
        }
        Provider::Yahoo => {
            let source = YahooSource::new(YahooConfig {
                base_url: config.data.base_url.clone(),
                user_agent: config.data.user_agent.clone(),
                timeout: config.data.timeout(),
            })?;

            // A zero max age treats every disk entry as stale; fresh downloads are still stored
            let max_age = if refresh {
                Some(Duration::ZERO)
            } else {
                config.data.cache_max_age()
            };
            let mut cache = config
                .data
                .cache_dir()
                .map(|dir| PriceCache::on_disk(dir, max_age));

            fetch_universe(&source, &request, cache.as_mut()).await?
        }
    };

    for (symbol, reason) in &outcome.failed {
        warn!(symbol = %symbol, reason = %reason, "Excluded from analysis");
    }

    Ok(outcome)
}
