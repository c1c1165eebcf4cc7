use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{access_log, create_cors_layer};
use axum::http::HeaderValue;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path of the Swagger UI.
pub const DOCS_PATH: &str = "/apidocs";
/// Path of the raw OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/apidocs.json";

/// Cross-cutting settings applied by [`create_router`].
#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// Allowed CORS origins; empty mirrors the request origin
    pub allowed_origins: Vec<HeaderValue>,
    /// Deadline for a whole request. Expiry drops the handler future.
    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Wrap the API routes with docs, fallback and middleware.
///
/// Adds:
/// - Swagger UI at `/apidocs`, OpenAPI JSON at `/apidocs.json`
/// - 404 `{error}` fallback
/// - request timeout and tracing spans
/// - compression, then CORS, with the access log outermost so it sees
///   preflights and the bytes actually sent
///
/// `apis` must already have its state applied. Health routes belong in `apis`
/// so they get the same middleware.
pub fn create_router<T>(apis: Router, config: &RouterConfig) -> Router
where
    T: OpenApi + 'static,
{
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(config.request_timeout);

    Router::new()
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(timeout)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(&config.allowed_origins))
        .layer(middleware::from_fn(access_log))
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` within `shutdown_timeout`.
///
/// In-flight requests are drained before cleanup starts. Peer addresses are
/// recorded so the access log can report them.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let signal = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    let serve_result = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { signal.wait_for_signal().await })
    .await
    .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    coordinator.shutdown();
    info!(timeout = ?shutdown_timeout, "Running cleanup");
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
