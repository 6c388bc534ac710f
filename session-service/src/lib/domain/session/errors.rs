use auth::AuthError;
use auth::AuthenticationError;
use thiserror::Error;

use crate::domain::user::errors::DirectoryError;
use crate::domain::user::errors::EmailError;

/// Top-level error for login, logout and current-user operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    // Infrastructure errors
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("User directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AuthError> for SessionError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Infrastructure(e) => SessionError::StoreUnavailable(e.to_string()),
            other => SessionError::Unknown(other.to_string()),
        }
    }
}

impl From<AuthenticationError> for SessionError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => SessionError::Unknown(e.to_string()),
            AuthenticationError::Session(e) => SessionError::from(e),
        }
    }
}
