//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL; the in-memory store is used when absent
    pub database_url: Option<String>,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Seconds to wait for a pooled connection before failing
    pub database_acquire_timeout_secs: u64,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    pub log_format: LogFormat,

    /// Attempts per transition before a version conflict is reported
    pub transition_max_retries: u32,

    /// JSON seed for the in-memory store; ignored when a database is configured
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let database_acquire_timeout_secs = lookup("DATABASE_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_ACQUIRE_TIMEOUT_SECS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        let transition_max_retries = lookup("TRANSITION_MAX_RETRIES")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u32>()
            .ok()
            .filter(|retries| *retries >= 1)
            .ok_or(ConfigError::InvalidValue("TRANSITION_MAX_RETRIES"))?;

        let seed_file = lookup("SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let config = Self {
            database_url,
            database_max_connections,
            database_acquire_timeout_secs,
            host,
            port,
            environment,
            log_format,
            transition_max_retries,
            seed_file,
        };

        if config.is_production() && config.database_url.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_URL"));
        }

        Ok(config)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
