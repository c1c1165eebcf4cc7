//! JSON extractor that normalizes and then validates its payload.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Canonicalize user input before validation (trim, case-fold, ...).
pub trait Normalize {
    fn normalize(&mut self);
}

/// Trim and lowercase an email address in place.
pub fn normalize_email(email: &mut String) {
    let normalized = email.trim().to_lowercase();
    *email = normalized;
}

/// Trim surrounding whitespace in place.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Decode `T` from a JSON body, run [`Normalize::normalize`], then `validator`.
///
/// Every failure is a 400 whose `error` carries the decoder or validator message.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateUserInput>) -> impl IntoResponse {
///     // input.email is already trimmed, lowercased and validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Normalize,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.normalize();
        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}
