//! Configuration management for the adherence trigger engine
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files (`config/default`, `config/{env}`)
//! - Environment variables (ADHERENCE__ prefix)
//!
//! Detection and scoring constants are not configurable; only the
//! reporting rollups and observability are.

pub mod settings;
pub mod aggregation;

pub use settings::{load_settings, load_settings_from, ObservabilityConfig, Settings};
pub use aggregation::AggregationConfig;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
