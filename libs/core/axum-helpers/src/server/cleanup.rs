use tracing::{error, info};

/// Close a SeaORM pool during shutdown, logging the outcome.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!("PostgreSQL connection '{}' closed", name),
        Err(e) => error!("Error closing PostgreSQL connection '{}': {}", name, e),
    }
}
