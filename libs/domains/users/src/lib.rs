//! Users Domain
//!
//! CRUD over the `users` resource: create, read, list, delete, plus
//! email and password changes that require the current password.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /v1/users endpoints, status mapping, OpenAPI
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← id generation, hashing, re-authentication, timestamps
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + PostgreSQL / in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entity, request DTOs, public view
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{CreateUserInput, UpdateEmailInput, UpdatePasswordInput, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
