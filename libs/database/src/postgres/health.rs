use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::time::Instant;
use tracing::debug;

use crate::common::DatabaseError;

/// Run `SELECT 1` through the pool.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Outcome of a timed health check.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: String, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message),
            response_time_ms,
        }
    }
}

/// [`check_health`] plus elapsed time, for the readiness endpoint.
pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let start = Instant::now();
    let result = check_health(db).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthStatus::healthy(elapsed),
        Err(e) => HealthStatus::unhealthy(e.to_string(), elapsed),
    }
}
