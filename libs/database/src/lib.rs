//! PostgreSQL connectivity for the users service.
//!
//! # Features
//!
//! - `postgres` (default) - pool setup, migrations and health checks on SeaORM
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "users_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::DatabaseError;
