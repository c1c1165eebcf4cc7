use axum::http::HeaderValue;
use axum_helpers::{RouterConfig, parse_origins};
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse_or, server::ServerConfig};
use database::postgres::{ConnectionParts, PostgresConfig};
use std::time::Duration;

use crate::cli::Cli;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// CORS and request deadline settings.
#[derive(Clone, Debug)]
pub struct HttpConfig {
    /// Empty mirrors the request origin
    pub allowed_origins: Vec<HeaderValue>,
    pub request_timeout: Duration,
}

impl HttpConfig {
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            allowed_origins: self.allowed_origins.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// `CORS_ALLOWED_ORIGIN` (comma-separated) and `REQUEST_TIMEOUT_SECS` (30)
impl FromEnv for HttpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGIN") {
            Ok(raw) => parse_origins(&raw).map_err(|details| ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details,
            })?,
            Err(_) => Vec::new(),
        };
        let timeout_secs: u64 = env_parse_or("REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            allowed_origins,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub environment: Environment,
    /// Extra connection attempts at startup (`DB_CONNECT_RETRIES`, default 0)
    pub connect_retries: u32,
}

impl Config {
    /// Environment first, then command-line flags on top.
    ///
    /// Passing any `--db-*` flag rebuilds the URL from discrete parts, so it
    /// also wins over `DATABASE_URL`.
    pub fn load(cli: &Cli) -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mut server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let mut database = PostgresConfig::from_env()?;
        let http = HttpConfig::from_env()?;
        let connect_retries = env_parse_or("DB_CONNECT_RETRIES", 0)?;

        if let Some(port) = cli.port {
            server.port = port;
        }

        if cli.has_db_overrides() {
            let mut parts = ConnectionParts::from_env()?;
            if let Some(user) = &cli.db_user {
                parts.user = user.clone();
            }
            if let Some(password) = &cli.db_pass {
                parts.password = password.clone();
            }
            if let Some(host) = &cli.db_host {
                parts.host = host.clone();
            }
            if let Some(port) = cli.db_port {
                parts.port = port;
            }
            if let Some(name) = &cli.db_name {
                parts.database = name.clone();
            }
            database.url = parts.to_url();
        }

        Ok(Self {
            app: app_info!(),
            database,
            server,
            http,
            environment,
            connect_retries,
        })
    }
}
