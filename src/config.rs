//! Service configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, before anything else runs.
//!
//! ## Main service variables
//!
//! - `DATABASE_URL` (required) - PostgreSQL connection string
//! - `LISTEN` - bind address (default: `0.0.0.0:8080`)
//! - `STATS_SERVER_URL` - base URL of the stats server
//!   (default: `http://localhost:9090`)
//! - `STATS_TIMEOUT_SECONDS` - stats round-trip timeout (default: 2)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - pool acquire timeout in seconds (default: 30)
//!
//! ## Stats server variables
//!
//! - `STATS_DATABASE_URL` (required) - PostgreSQL connection string
//! - `STATS_LISTEN` - bind address (default: `0.0.0.0:9090`)
//!
//! The log and pool variables apply to both binaries.

use anyhow::{Context, Result};
use std::env;

/// Main service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub stats_server_url: String,
    pub stats_timeout_seconds: u64,
    pub log_level: String,
    pub log_format: String,
    pub db_max_connections: u32,
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when `DATABASE_URL` is missing.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        Ok(Self {
            database_url,
            listen_addr: env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            stats_server_url: env::var("STATS_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:9090".to_string()),
            stats_timeout_seconds: env_or("STATS_TIMEOUT_SECONDS", 2),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            db_connect_timeout: env_or("DB_CONNECT_TIMEOUT", 30),
        })
    }
}

/// Stats server configuration.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub db_max_connections: u32,
    pub db_connect_timeout: u64,
}

impl StatsConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when `STATS_DATABASE_URL` is missing.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("STATS_DATABASE_URL").context("STATS_DATABASE_URL must be set")?;

        Ok(Self {
            database_url,
            listen_addr: env::var("STATS_LISTEN").unwrap_or_else(|_| "0.0.0.0:9090".to_string()),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            db_connect_timeout: env_or("DB_CONNECT_TIMEOUT", 30),
        })
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Installs the global tracing subscriber in text or JSON format.
pub fn init_tracing(log_level: &str, log_format: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if log_format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
