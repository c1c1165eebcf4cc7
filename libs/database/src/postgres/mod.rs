//! Pool setup, migrations and health checks for PostgreSQL

mod config;
mod connector;
mod health;

pub use config::{ConnectionParts, PostgresConfig};
pub use connector::{connect_from_config_with_retry, connect_with_options, run_migrations};
pub use health::{HealthStatus, check_health, check_health_detailed};

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
