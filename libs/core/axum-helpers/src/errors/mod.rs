pub mod handlers;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Error body returned by every failing endpoint.
///
/// ```json
/// { "error": "cannot delete: 6f1c..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Text of the underlying error
    #[schema(example = "cannot update: a@b.com")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Transport-level error, rendered as an [`ErrorResponse`].
///
/// The `Display` text of each variant is exactly the message placed in the body.
#[derive(Debug, Error)]
pub enum AppError {
    /// Body could not be decoded. Always 400, whatever status axum picked.
    #[error("{}", .0.body_text())]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("{0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match &self {
            AppError::InternalServerError(_) => tracing::error!(%status, "{}", message),
            _ => tracing::info!(%status, "{}", message),
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
