use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Discrete connection settings used when no `DATABASE_URL` is supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionParts {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl ConnectionParts {
    /// Render as a `postgres://` URL. Credentials are percent-encoded.
    pub fn to_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.database
        )
    }
}

impl Default for ConnectionParts {
    fn default() -> Self {
        Self {
            user: "guest".to_string(),
            password: "guest".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            database: "sandbox".to_string(),
        }
    }
}

/// PostgreSQL pool configuration.
///
/// Defaults: 25 connections at most, none kept warm, and connections
/// recycled after five minutes.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Log every statement through sqlx
    pub sqlx_logging: bool,
    pub sqlx_logging_level: LevelFilter,
}

impl PostgresConfig {
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(self.sqlx_logging_level);
        opt
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: ConnectionParts::default().to_url(),
            max_connections: 25,
            min_connections: 0,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 300,
            max_lifetime_secs: 300,
            sqlx_logging: false,
            sqlx_logging_level: LevelFilter::Debug,
        }
    }
}

#[cfg(feature = "config")]
impl FromEnv for ConnectionParts {
    /// `DB_USER`, `DB_PASS`, `DB_HOST`, `DB_PORT`, `DB_NAME`
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            user: env_or_default("DB_USER", &defaults.user),
            password: env_or_default("DB_PASS", &defaults.password),
            host: env_or_default("DB_HOST", &defaults.host),
            port: env_parse_or("DB_PORT", defaults.port)?,
            database: env_or_default("DB_NAME", &defaults.database),
        })
    }
}

/// `DATABASE_URL` wins when set; otherwise the URL is assembled from
/// [`ConnectionParts`]. Pool knobs:
/// - `DB_MAX_CONNECTIONS` (25)
/// - `DB_MIN_CONNECTIONS` (0)
/// - `DB_CONNECT_TIMEOUT_SECS` (8)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (8)
/// - `DB_IDLE_TIMEOUT_SECS` (300)
/// - `DB_MAX_LIFETIME_SECS` (300)
/// - `DB_SQLX_LOGGING` (false)
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => ConnectionParts::from_env()?.to_url(),
        };

        Ok(Self {
            url,
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: env_parse_or("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout_secs: env_parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            acquire_timeout_secs: env_parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
            idle_timeout_secs: env_parse_or("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout_secs)?,
            max_lifetime_secs: env_parse_or("DB_MAX_LIFETIME_SECS", defaults.max_lifetime_secs)?,
            sqlx_logging: env_parse_or("DB_SQLX_LOGGING", defaults.sqlx_logging)?,
            sqlx_logging_level: defaults.sqlx_logging_level,
        })
    }
}
