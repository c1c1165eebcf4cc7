/// Errors raised while talking to the database.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}
