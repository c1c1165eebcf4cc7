//! HTTP middleware: CORS and the access log.
//!
//! ```ignore
//! use axum_helpers::http::{access_log, create_cors_layer};
//!
//! let app = Router::new()
//!     .layer(create_cors_layer(&origins))
//!     .layer(axum::middleware::from_fn(access_log));
//! ```

pub mod access_log;
pub mod cors;

pub use access_log::{AccessLogEntry, access_log};
pub use cors::{ENTITY_HEADER, create_cors_layer, parse_origins};
