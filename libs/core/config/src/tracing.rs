use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install color-eyre for startup error reports.
///
/// Call this first in `main()`. Safe to call more than once.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

fn default_filter(environment: &Environment) -> EnvFilter {
    if environment.is_production() {
        EnvFilter::new("info,tower_http=info,sea_orm=warn,sqlx=warn")
    } else {
        EnvFilter::new("debug,tower_http=debug,sea_orm=info,sqlx=info,hyper=info")
    }
}

/// Initialize the global subscriber.
///
/// - **Production** (`APP_ENV=production`): flattened JSON lines.
/// - **Development** (default): pretty, human-readable output.
///
/// Both variants carry a `tracing_error::ErrorLayer` so eyre reports include
/// span traces. `RUST_LOG` overrides the default filter.
///
/// A second call is a no-op, which keeps tests that each initialize tracing happy.
pub fn init_tracing(environment: &Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(environment));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
