use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found: {0}")]
    NotFound(Uuid),

    /// Current password did not match. Carries the stored email.
    #[error("cannot update: {email}")]
    InvalidCredentials { email: String },

    #[error("password hashing error: {0}")]
    PasswordHash(String),

    /// Raw driver message
    #[error("{0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        UserError::Storage(err.to_string())
    }
}

/// Every domain failure is a 400 with the error text; see the list handler
/// for the one exception.
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::PasswordHash(_) | UserError::Internal(_) => {
                tracing::error!(error = %err, "User operation failed");
            }
            _ => {}
        }
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_names_current_email() {
        let err = UserError::InvalidCredentials {
            email: "a@b.com".to_string(),
        };
        assert_eq!(err.to_string(), "cannot update: a@b.com");
    }

    #[test]
    fn test_storage_error_keeps_driver_text() {
        let err: UserError = sea_orm::DbErr::Custom("connection reset".to_string()).into();
        assert!(matches!(&err, UserError::Storage(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_every_user_error_maps_to_bad_request() {
        let id = Uuid::now_v7();
        let app: AppError = UserError::NotFound(id).into();
        assert!(matches!(app, AppError::BadRequest(ref m) if m == &format!("user not found: {id}")));

        let app: AppError = UserError::Internal("join".to_string()).into();
        assert!(matches!(app, AppError::BadRequest(_)));
    }
}
