//! Settings read from the process environment.
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

/// Default size of the SQLite connection pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time a writer waits for the database lock, in milliseconds.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Structured JSON lines.
    Json,
    /// Human readable console output.
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(ConfigError::Invalid {
                name: "LOG_FORMAT",
                value: s.to_string(),
            }),
        }
    }
}

/// Runtime configuration of the cemetery manager.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
    pub log_format: LogFormat,
}

impl ManagerConfig {
    /// Reads the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: SQLite connection URL (required)
    /// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `DATABASE_BUSY_TIMEOUT_MS`: lock wait for writers (default: 5000)
    /// - `LOG_FORMAT`: "json" or "pretty" (default: pretty)
    ///
    /// # Returns
    ///
    /// * `Ok(ManagerConfig)` - Parsed configuration
    /// * `Err(ConfigError)` - If a required variable is missing or a value
    ///   cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: max_connections.to_string(),
            });
        }
        let busy_timeout =
            Duration::from_millis(parse_var("DATABASE_BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?);
        let log_format = match env::var("LOG_FORMAT") {
            Ok(value) => value.parse()?,
            Err(_) => LogFormat::default(),
        };

        Ok(Self {
            database_url,
            max_connections,
            busy_timeout,
            log_format,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
