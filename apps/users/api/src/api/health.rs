//! Readiness check backed by a real database round trip.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// 200 when `SELECT 1` succeeds through the pool, 503 otherwise.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            let status = database::postgres::check_health_detailed(&state.db).await;
            tracing::debug!(elapsed_ms = status.response_time_ms, "Database ping finished");

            if status.healthy {
                Ok(())
            } else {
                Err(format!(
                    "Database ping failed: {}",
                    status.message.unwrap_or_default()
                ))
            }
        }),
    )];

    run_health_checks(checks).await.into_response()
}
