//! Command-line interface parsing for the Pokedex CLI
//!
//! This module handles parsing of CLI arguments using clap and validating them
//! into a `StartupConfig`: cache interval, API root, page size and log level.

use clap::Parser;
use std::time::Duration;
use thiserror::Error;

use crate::data::pokeapi::POKEAPI_BASE_URL;

/// Default cache interval in seconds (five minutes)
pub const DEFAULT_CACHE_INTERVAL_SECS: u64 = 300;

/// Default number of location areas per `map` page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// The cache interval was zero
    #[error("Invalid cache interval: must be at least 1 second")]
    ZeroCacheInterval,

    /// The page size was zero
    #[error("Invalid page size: must be at least 1")]
    ZeroPageSize,

    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Pokedex CLI - Explore PokeAPI location areas and catch Pokemon
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Explore location areas and catch Pokemon from PokeAPI")]
#[command(version)]
pub struct Cli {
    /// How long responses stay cached, and how often stale ones are swept
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_CACHE_INTERVAL_SECS)]
    pub cache_interval: u64,

    /// Root URL of the PokeAPI v2 REST API
    #[arg(long, value_name = "URL", default_value = POKEAPI_BASE_URL)]
    pub base_url: String,

    /// Number of location areas shown per map page
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Log verbosity written to stderr (RUST_LOG takes precedence)
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Cache sweep period and entry expiry threshold
    pub cache_interval: Duration,
    /// API root without a trailing slash
    pub base_url: String,
    /// Location areas per page
    pub page_size: usize,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_interval: Duration::from_secs(DEFAULT_CACHE_INTERVAL_SECS),
            base_url: POKEAPI_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: "warn".to_string(),
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if any setting is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_interval == 0 {
            return Err(CliError::ZeroCacheInterval);
        }
        if cli.page_size == 0 {
            return Err(CliError::ZeroPageSize);
        }

        let base_url = cli.base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        Ok(StartupConfig {
            cache_interval: Duration::from_secs(cli.cache_interval),
            base_url: base_url.to_string(),
            page_size: cli.page_size,
            log_level: cli.log_level.clone(),
        })
    }
}
