//! Configuration management.

mod settings;

pub use settings::{
    AnalysisSettings, AppConfig, AppSettings, ChartSettings, DataSettings, LoggingConfig,
    Provider, UniverseSettings, DEFAULT_TICKERS,
};

pub use config::ConfigError;

use config::{Config, Environment, File};
use std::path::Path;

/// Default location probed when no file is given.
pub const DEFAULT_CONFIG: &str = "config/default";

/// Load configuration from file and environment.
///
/// An explicit `path` must exist. Without one, `config/default.toml` is used
/// when present. Environment variables such as `BREADTH__DATA__LOOKBACK=2y`
/// override both; `BREADTH__UNIVERSE__TICKERS` takes a comma-separated list.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("BREADTH")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("universe.tickers")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
