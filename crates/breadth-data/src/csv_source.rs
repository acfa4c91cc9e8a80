//! CSV data source.

use async_trait::async_trait;
use breadth_core::error::DataError;
use breadth_core::traits::DataSource;
use breadth_core::types::{Interval, Lookback, PricePoint, PriceSeries, PriceTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

const DATE_COLUMNS: [&str; 4] = ["Date", "date", "timestamp", "Timestamp"];
const CLOSE_COLUMNS: [&str; 4] = ["Adj Close", "adj_close", "Close", "close"];

/// CSV data source for offline analysis.
///
/// The path is either a directory of per-symbol files (`AAPL.csv`,
/// `aapl.csv`, `AAPL_daily.csv`) with a date and close column, or a single
/// wide panel file with a date column followed by one column per symbol.
/// A panel file is parsed once and shared by every subsequent fetch.
pub struct CsvDataSource {
    path: PathBuf,
    panel: OnceLock<PriceTable>,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::Internal(format!(
                "data path {} does not exist",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
            panel: OnceLock::new(),
        })
    }

    fn panel(&self, interval: Interval) -> Result<&PriceTable, DataError> {
        if let Some(table) = self.panel.get() {
            return Ok(table);
        }
        let table = self.load_table(interval)?;
        debug!(
            file = %self.path.display(),
            symbols = table.symbols().len(),
            rows = table.dates().len(),
            "Loaded price panel"
        );
        Ok(self.panel.get_or_init(|| table))
    }

    /// Load the whole file as a wide panel.
    pub fn load_table(&self, interval: Interval) -> Result<PriceTable, DataError> {
        if self.path.is_dir() {
            return Err(DataError::Internal(format!(
                "{} is a directory, expected a panel file",
                self.path.display()
            )));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| DataError::ParseError(e.to_string()))?
            .clone();
        let date_idx = find_column(&headers, &DATE_COLUMNS).unwrap_or(0);

        let symbols: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx)
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        let mut dates = Vec::new();
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); symbols.len()];

        for result in reader.records() {
            let record = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let date = parse_date(record.get(date_idx).unwrap_or_default())?;
            dates.push(date);

            for (column, (idx, _)) in columns.iter_mut().zip(&symbols) {
                column.push(parse_price(record.get(*idx)));
            }
        }

        // Rows may be in any order on disk
        let mut order: Vec<usize> = (0..dates.len()).collect();
        order.sort_by_key(|&i| dates[i]);
        let dates: Vec<NaiveDate> = order.iter().map(|&i| dates[i]).collect();

        let columns = symbols
            .into_iter()
            .zip(columns)
            .map(|((_, symbol), column)| {
                (symbol, order.iter().map(|&i| column[i]).collect::<Vec<_>>())
            })
            .collect();

        PriceTable::from_columns(interval, dates, columns)
    }

    /// Locate the file holding a symbol inside a data directory.
    fn symbol_file(&self, symbol: &str) -> Option<PathBuf> {
        let lower = symbol.to_lowercase();
        [
            format!("{}.csv", symbol),
            format!("{}.csv", lower),
            format!("{}_daily.csv", symbol),
            format!("{}_daily.csv", lower),
        ]
        .into_iter()
        .map(|name| self.path.join(name))
        .find(|p| p.is_file())
    }

    /// Load one symbol's closes from a single-symbol file.
    fn load_symbol_file(
        path: &Path,
        symbol: &str,
        interval: Interval,
    ) -> Result<PriceSeries, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| DataError::ParseError(e.to_string()))?
            .clone();
        let date_idx = find_column(&headers, &DATE_COLUMNS).unwrap_or(0);
        let close_idx = find_column(&headers, &CLOSE_COLUMNS).ok_or_else(|| {
            DataError::ParseError(format!("{} has no close column", path.display()))
        })?;

        let mut points = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let close = parse_price(record.get(close_idx));
            if close.is_nan() {
                continue;
            }
            let date = parse_date(record.get(date_idx).unwrap_or_default())?;
            points.push(PricePoint::new(date, close));
        }

        Ok(PriceSeries::new(symbol, interval, points))
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn fetch_closes(
        &self,
        symbol: &str,
        interval: Interval,
        _lookback: Lookback,
    ) -> Result<PriceSeries, DataError> {
        let series = if self.path.is_dir() {
            let file = self
                .symbol_file(symbol)
                .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;
            debug!(symbol, file = %file.display(), "Loading symbol file");
            Self::load_symbol_file(&file, symbol, interval)?
        } else {
            let table = self.panel(interval)?;
            let column = table
                .column(symbol)
                .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;
            let points = table
                .dates()
                .iter()
                .zip(column)
                .filter(|(_, c)| !c.is_nan())
                .map(|(d, c)| PricePoint::new(*d, *c))
                .collect();
            PriceSeries::new(symbol, interval, points)
        };

        if series.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(series)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Write a panel as `Date,SYM1,SYM2,...`; missing cells are left empty.
pub fn write_table(table: &PriceTable, path: &Path) -> Result<(), DataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DataError::Internal(e.to_string()))?;
    }

    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|e| DataError::Internal(e.to_string()))?;

    let mut header = vec!["Date".to_string()];
    header.extend(table.symbols().iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| DataError::Internal(e.to_string()))?;

    let columns: Vec<&[f64]> = table.iter_columns().map(|(_, c)| c).collect();
    for (row, date) in table.dates().iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(date.format("%Y-%m-%d").to_string());
        for column in &columns {
            let value = column[row];
            record.push(if value.is_nan() {
                String::new()
            } else {
                value.to_string()
            });
        }
        writer
            .write_record(&record)
            .map_err(|e| DataError::Internal(e.to_string()))?;
    }

    writer.flush().map_err(|e| DataError::Internal(e.to_string()))
}

fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name))
}

fn parse_price(cell: Option<&str>) -> f64 {
    match cell.map(str::trim) {
        None | Some("") => f64::NAN,
        Some(s) => s.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Parse various date formats.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let date_str = date_str.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.date());
        }
    }

    // Offset-qualified timestamps, e.g. "2024-01-02 00:00:00-05:00"
    if let Ok(dt) = DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.date_naive());
    }

    // Unix timestamp, milliseconds if more than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        let secs = if ts > 10_000_000_000 { ts / 1000 } else { ts };
        if let Some(dt) = DateTime::from_timestamp(secs, 0) {
            return Ok(dt.date_naive());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
