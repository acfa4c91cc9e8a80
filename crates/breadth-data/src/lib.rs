//! Price data sources for the breadth pipeline.

mod cache;
mod csv_source;
mod universe;
mod yahoo;

pub use cache::PriceCache;
pub use csv_source::{write_table, CsvDataSource};
pub use universe::{fetch_universe, FetchOutcome, FetchRequest};
pub use yahoo::{YahooConfig, YahooSource};

