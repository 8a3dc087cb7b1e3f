//! Configuration management for pagefetch
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use pagefetch::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Fetching {} pages from {}", config.fetch.image_count, config.fetch.base_url);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `PAGEFETCH__<section>__<key>`
//!
//! Examples:
//! - `PAGEFETCH__FETCH__BASE_URL=https://cdn.example.com/ch3/`
//! - `PAGEFETCH__FETCH__IMAGE_COUNT=42`
//! - `PAGEFETCH__ARCHIVE__ENABLED=true`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/pagefetch.toml`.
//! This can be overridden using the `PAGEFETCH_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{ArchiveSettings, Config, FetchSettings, HttpSettings, TelemetryConfig};
pub use sources::config_path;
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`PAGEFETCH__*`)
    /// 2. TOML file (default: `config/pagefetch.toml`)
    /// 3. Default values
    ///
    /// Not validated: callers apply command-line overrides first and then
    /// call [`Config::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        Ok(sources::load()?)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        Ok(sources::load_from_sources(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self)?;
        Ok(())
    }
}
