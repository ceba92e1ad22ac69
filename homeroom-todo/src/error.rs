/// Error handling for the to-do server
///
/// User-facing failures become a redirect plus a flash message. A task that
/// is absent and a task that belongs to someone else produce the identical
/// `NotFound` response, so the app never confirms another user's task ids.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use homeroom_shared::{
    auth::{credentials::CredentialError, password::PasswordError, session::SessionError},
    flash::{self, FlashLevel},
};
use std::fmt;

/// Handler result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type
#[derive(Debug)]
pub enum AppError {
    /// Login failed; deliberately carries no detail
    InvalidCredentials,

    /// Registration attempted with an already-registered email
    DuplicateEmail,

    /// A registration form field failed validation
    Validation(String),

    /// Task title was empty after trimming
    EmptyTitle,

    /// Task absent or owned by someone else; the two are indistinguishable
    NotFound,

    /// Template rendering failed
    Template(askama::Error),

    /// Anything else; logged, never shown to the client
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::DuplicateEmail => write!(f, "Email already registered"),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::EmptyTitle => write!(f, "Empty task title"),
            AppError::NotFound => write!(f, "Task not found"),
            AppError::Template(err) => write!(f, "Template error: {}", err),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidCredentials => {
                flash::redirect_with_flash("/login", FlashLevel::Error, "Invalid email or password.")
            }
            AppError::DuplicateEmail => flash::redirect_with_flash(
                "/register",
                FlashLevel::Error,
                "That email address is already registered.",
            ),
            AppError::Validation(msg) => {
                flash::redirect_with_flash("/register", FlashLevel::Error, &msg)
            }
            AppError::EmptyTitle => flash::redirect_with_flash(
                "/",
                FlashLevel::Error,
                "Task title cannot be empty.",
            ),
            AppError::NotFound => {
                flash::redirect_with_flash("/", FlashLevel::Error, "That task does not exist.")
            }
            AppError::Template(err) => {
                tracing::error!("Template rendering failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::Database(db_err) => {
                if db_err
                    .constraint()
                    .is_some_and(|constraint| constraint.contains("email"))
                {
                    return AppError::DuplicateEmail;
                }
                AppError::Internal(format!("Database error: {}", db_err))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidCredentials => AppError::InvalidCredentials,
            CredentialError::DuplicateEmail => AppError::DuplicateEmail,
            CredentialError::Password(e) => AppError::Internal(format!("Password error: {}", e)),
            CredentialError::Database(e) => AppError::from(e),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::Internal(format!("Password operation failed: {}", err))
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Internal(format!("Session token operation failed: {}", err))
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Template(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AppError::EmptyTitle.to_string(), "Empty task title");
        assert_eq!(AppError::NotFound.to_string(), "Task not found");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::NotFound
        ));
    }
}
