use axum_helpers::server::{close_postgres, create_production_app};
use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod cli;
mod config;
mod openapi;
mod state;

use cli::Cli;
use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let cli = Cli::parse();
    let config = Config::load(&cli)?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        retries = config.connect_retries,
        "Connecting to PostgreSQL"
    );

    let retry = RetryConfig::new().with_max_retries(config.connect_retries);
    let db = connect_from_config_with_retry(config.database.clone(), Some(retry))
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    run_migrations::<Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let state = AppState { config, db };

    let app = api::app(&state);

    info!("Starting users API with graceful shutdown (30s timeout)");

    let server = state.config.server.clone();
    let db = state.db;
    create_production_app(
        app,
        &server,
        Duration::from_secs(30),
        async move {
            close_postgres(db, "PostgreSQL").await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
