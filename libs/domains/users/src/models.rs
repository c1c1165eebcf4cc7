use axum_helpers::{
    Normalize,
    extractors::validated_json::{normalize_email, trim_in_place},
};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity, one row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Generated server-side, immutable
    pub id: Uuid,
    pub email: String,
    /// Argon2 PHC string, never plaintext
    pub password: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful mutation
    pub updated_at: DateTime<Utc>,
}

/// Current time at the column precision of `timestamptz`.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl User {
    /// New record with both timestamps set to the same instant.
    pub fn new(email: String, password_hash: String) -> Self {
        let now = now();
        Self {
            id: Uuid::now_v7(),
            email,
            password: password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = now().max(self.created_at);
    }
}

/// Public view of a user.
///
/// `password` carries the stored hash. Exposing it is existing API behavior
/// and is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "a@b.com")]
    pub email: String,
    /// Stored password hash
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            password: user.password,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

const REDACTED: &str = "[redacted]";

/// Body of `POST /v1/users`
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserInput {
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "a@b.com")]
    pub email: String,
    #[validate(length(min = 3, max = 100, message = "must be between 3 and 100 characters"))]
    #[schema(example = "secret", min_length = 3, max_length = 100)]
    pub password: String,
}

impl Normalize for CreateUserInput {
    fn normalize(&mut self) {
        normalize_email(&mut self.email);
        trim_in_place(&mut self.password);
    }
}

impl fmt::Debug for CreateUserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserInput")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Body of `PUT /v1/users/{id}/email`: the new email plus the current password
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateEmailInput {
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "c@d.com")]
    pub email: String,
    #[validate(length(min = 3, max = 100, message = "must be between 3 and 100 characters"))]
    #[schema(min_length = 3, max_length = 100)]
    pub password: String,
}

impl Normalize for UpdateEmailInput {
    fn normalize(&mut self) {
        normalize_email(&mut self.email);
        trim_in_place(&mut self.password);
    }
}

impl fmt::Debug for UpdateEmailInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateEmailInput")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Body of `PUT /v1/users/{id}/password`
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordInput {
    #[validate(length(min = 3, max = 100, message = "must be between 3 and 100 characters"))]
    #[schema(min_length = 3, max_length = 100)]
    pub current_password: String,
    #[validate(length(min = 3, max = 100, message = "must be between 3 and 100 characters"))]
    #[schema(min_length = 3, max_length = 100)]
    pub new_password: String,
}

impl Normalize for UpdatePasswordInput {
    fn normalize(&mut self) {
        trim_in_place(&mut self.current_password);
        trim_in_place(&mut self.new_password);
    }
}

impl fmt::Debug for UpdatePasswordInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdatePasswordInput")
            .field("current_password", &REDACTED)
            .field("new_password", &REDACTED)
            .finish()
    }
}
