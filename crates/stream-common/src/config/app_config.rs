//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use stream_core::SchedulingHorizon;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub schedule: ScheduleConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Upper bound on waiting for a row lock inside one transaction
    #[serde(default)]
    pub lock_timeout_ms: Option<u64>,
}

impl DatabaseConfig {
    #[must_use]
    pub fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout_ms.map(Duration::from_millis)
    }
}

/// Reservation scheduling configuration, fixed at process start
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Horizon start, UNIX seconds
    pub horizon_start: i64,
    /// Horizon end, UNIX seconds
    pub horizon_end: i64,
    #[serde(default = "default_transaction_timeout_ms")]
    pub transaction_timeout_ms: u64,
}

impl ScheduleConfig {
    /// Build the validated scheduling horizon
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if the start is not before the end
    pub fn horizon(&self) -> Result<SchedulingHorizon, ConfigError> {
        SchedulingHorizon::new(self.horizon_start, self.horizon_end)
            .map_err(|e| ConfigError::InvalidValue("SCHEDULE_HORIZON", e.to_string()))
    }

    #[must_use]
    pub fn transaction_timeout(&self) -> Duration {
        Duration::from_millis(self.transaction_timeout_ms)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let horizon = SchedulingHorizon::default();
        Self {
            horizon_start: horizon.start_at(),
            horizon_end: horizon.end_at(),
            transaction_timeout_ms: default_transaction_timeout_ms(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "stream-scheduler".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_transaction_timeout_ms() -> u64 {
    10_000
}

/// Parse an optional variable, failing on values that are present but malformed
fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let schedule_defaults = ScheduleConfig::default();

        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var(&lookup, "DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                lock_timeout_ms: parse_var(&lookup, "DATABASE_LOCK_TIMEOUT_MS")?,
            },
            schedule: ScheduleConfig {
                horizon_start: parse_var(&lookup, "SCHEDULE_HORIZON_START")?
                    .unwrap_or(schedule_defaults.horizon_start),
                horizon_end: parse_var(&lookup, "SCHEDULE_HORIZON_END")?
                    .unwrap_or(schedule_defaults.horizon_end),
                transaction_timeout_ms: parse_var(&lookup, "TRANSACTION_TIMEOUT_MS")?
                    .unwrap_or(schedule_defaults.transaction_timeout_ms),
            },
        };

        config.schedule.horizon()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
