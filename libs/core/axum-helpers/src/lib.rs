//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service binaries.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly with OpenAPI docs, health checks, graceful shutdown
//! - **[`http`]**: CORS policy and the common-log-format access logger
//! - **[`errors`]**: the flat `{ "error": "..." }` error body
//! - **[`extractors`]**: validated JSON bodies and id path parameters
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{RouterConfig, create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &RouterConfig::default());
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, RouterConfig, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{AccessLogEntry, ENTITY_HEADER, access_log, create_cors_layer, parse_origins};

pub use errors::{AppError, ErrorResponse};

pub use extractors::{Normalize, UuidPath, ValidatedJson};
