use axum::Router;
use axum_helpers::server::{create_router, health_router};

use crate::state::AppState;

pub mod health;
pub mod users;

/// Every route of the service behind the shared middleware stack.
///
/// - /health: liveness check with app name/version
/// - /ready: readiness check against the pool
pub fn app(state: &AppState) -> Router {
    let routes = routes(state)
        .merge(health_router(state.config.app.clone()))
        .merge(ready_router(state.clone()));

    create_router::<crate::openapi::ApiDoc>(routes, &state.config.http.router_config())
}

/// Creates the API routes. Docs and middleware are added by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new().merge(users::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied so it merges with the stateless routes.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
