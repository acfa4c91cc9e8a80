//! Price caching.

use breadth_core::error::DataError;
use breadth_core::types::{Interval, Lookback, PricePoint, PriceSeries};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

use crate::csv_source::parse_date;

/// In-memory price cache with an optional on-disk CSV layer.
///
/// Disk entries live at `{cache_dir}/{SYMBOL}_{lookback}_{interval}.csv` and
/// are ignored once older than `max_age`.
pub struct PriceCache {
    cache: HashMap<String, PriceSeries>,
    cache_dir: Option<PathBuf>,
    max_age: Option<Duration>,
}

impl PriceCache {
    /// Create a memory-only cache.
    pub fn in_memory() -> Self {
        Self {
            cache: HashMap::new(),
            cache_dir: None,
            max_age: None,
        }
    }

    /// Create a cache persisted under `cache_dir`.
    pub fn on_disk(cache_dir: PathBuf, max_age: Option<Duration>) -> Self {
        Self {
            cache: HashMap::new(),
            cache_dir: Some(cache_dir),
            max_age,
        }
    }

    /// Generate cache key.
    fn cache_key(symbol: &str, interval: Interval, lookback: Lookback) -> String {
        format!("{}_{}_{}", symbol, lookback, interval)
    }

    fn file_for(&self, key: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.csv", key)))
    }

    /// Get cached closes, reading through to disk on a memory miss.
    pub fn get(&mut self, symbol: &str, interval: Interval, lookback: Lookback) -> Option<PriceSeries> {
        let key = Self::cache_key(symbol, interval, lookback);
        if let Some(series) = self.cache.get(&key) {
            return Some(series.clone());
        }

        let path = self.file_for(&key)?;
        if !self.is_fresh(&path) {
            return None;
        }

        match read_series(&path, symbol, interval) {
            Ok(series) if !series.is_empty() => {
                debug!(symbol, path = %path.display(), "Cache hit");
                self.cache.insert(key, series.clone());
                Some(series)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(symbol, error = %e, "Ignoring unreadable cache entry");
                None
            }
        }
    }

    /// Store closes in the cache.
    pub fn put(&mut self, series: &PriceSeries, lookback: Lookback) -> Result<(), DataError> {
        let key = Self::cache_key(&series.symbol, series.interval, lookback);
        if let Some(path) = self.file_for(&key) {
            write_series(&path, series)?;
        }
        self.cache.insert(key, series.clone());
        Ok(())
    }

    fn is_fresh(&self, path: &Path) -> bool {
        let Ok(metadata) = std::fs::metadata(path) else {
            return false;
        };
        match self.max_age {
            None => true,
            Some(max_age) => metadata
                .modified()
                .ok()
                .and_then(|m| SystemTime::now().duration_since(m).ok())
                .map(|age| age <= max_age)
                .unwrap_or(false),
        }
    }
}

fn cache_err(e: impl std::fmt::Display) -> DataError {
    DataError::CacheError(e.to_string())
}

fn write_series(path: &Path, series: &PriceSeries) -> Result<(), DataError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(cache_err)?;
    }

    let mut writer = WriterBuilder::new().from_path(path).map_err(cache_err)?;
    writer.write_record(["Date", "Close"]).map_err(cache_err)?;
    for point in series.iter() {
        writer
            .write_record([point.date.format("%Y-%m-%d").to_string(), point.close.to_string()])
            .map_err(cache_err)?;
    }
    writer.flush().map_err(cache_err)
}

fn read_series(path: &Path, symbol: &str, interval: Interval) -> Result<PriceSeries, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(cache_err)?;

    let mut points = Vec::new();
    for result in reader.records() {
        let record = result.map_err(cache_err)?;
        let date = parse_date(record.get(0).unwrap_or_default())?;
        let close = record
            .get(1)
            .unwrap_or_default()
            .parse::<f64>()
            .map_err(cache_err)?;
        points.push(PricePoint::new(date, close));
    }

    Ok(PriceSeries::new(symbol, interval, points))
}
