//! Shared application state handed to the app-level handlers.

use database::postgres::DatabaseConnection;

/// Cloned per handler; the pool inside is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
}
