//! Router assembly, health endpoints and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{RouterConfig, create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &RouterConfig::default())
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &server_config, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{RouterConfig, create_production_app, create_router};
pub use cleanup::close_postgres;
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
