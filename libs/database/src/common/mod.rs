//! Error type and retry helpers shared by the connectors

pub mod error;
pub mod retry;

pub use error::DatabaseError;
pub use retry::{RetryConfig, retry_with_backoff};
