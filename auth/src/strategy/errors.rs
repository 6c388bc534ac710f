use thiserror::Error;

use crate::jwt::JwtError;
use crate::session::StoreError;

/// Outcome taxonomy for issuing and validating session tokens.
///
/// Every variant is terminal for the request that produced it. Only
/// `Infrastructure` reflects a dependency failure rather than a judgement
/// about the presented credential.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("No credential presented")]
    MissingCredential,

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Token is expired")]
    Expired,

    #[error("Session has been revoked")]
    Revoked,

    #[error("Identity must not be empty")]
    EmptyIdentity,

    #[error("Session store failure: {0}")]
    Infrastructure(#[from] StoreError),

    #[error("Token configuration error: {0}")]
    Configuration(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Malformed(_) => AuthError::InvalidToken,
            JwtError::InvalidKey(msg) | JwtError::EncodingFailed(msg) => {
                AuthError::Configuration(msg)
            }
        }
    }
}
