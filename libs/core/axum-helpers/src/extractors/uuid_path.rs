//! Identifier path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Single `{id}` path segment, whitespace-trimmed and parsed as a UUID.
///
/// A segment that is not a UUID is rejected with 400: no record can have it.
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        parse_id(&raw)
            .map(UuidPath)
            .map_err(IntoResponse::into_response)
    }
}

pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed).map_err(|_| AppError::BadRequest(format!("invalid id: {}", trimmed)))
}
