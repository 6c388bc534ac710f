use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::jwt::SessionClaims;
use crate::strategy::AuthError;
use crate::strategy::TokenStrategy;

/// Cookie carrying the session token when no bearer header is sent.
pub const DEFAULT_COOKIE_NAME: &str = "token";

const BEARER_SCHEME: &str = "Bearer";

/// Identity attached to a request after its token was validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedContext {
    pub identity: String,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<SessionClaims> for AuthenticatedContext {
    fn from(claims: SessionClaims) -> Self {
        let expires_at = claims.expires_at();
        Self {
            identity: claims.email,
            session_id: claims.session_id,
            expires_at,
        }
    }
}

/// Pick the candidate token from the request credentials.
///
/// A bearer `Authorization` header wins. Any other header value falls back
/// to the cookie, whose value may itself carry a `Bearer ` prefix and
/// surrounding quotes.
///
/// # Errors
/// * `MissingCredential` - Neither source yields a non-empty token
pub fn extract_token<'a>(
    authorization: Option<&'a str>,
    cookie: Option<&'a str>,
) -> Result<&'a str, AuthError> {
    if let Some(token) = authorization.and_then(strip_bearer) {
        return Ok(token);
    }

    cookie
        .map(|value| value.trim().trim_matches('"'))
        .map(|value| strip_bearer(value).unwrap_or(value).trim())
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingCredential)
}

fn strip_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Per-request gatekeeper in front of protected operations.
///
/// Performs no I/O itself; it extracts, delegates to the token strategy and
/// classifies the outcome.
pub struct AuthGate<T: TokenStrategy + ?Sized> {
    strategy: Arc<T>,
}

impl<T: TokenStrategy + ?Sized> Clone for AuthGate<T> {
    fn clone(&self) -> Self {
        Self {
            strategy: Arc::clone(&self.strategy),
        }
    }
}

impl<T: TokenStrategy + ?Sized> AuthGate<T> {
    pub fn new(strategy: Arc<T>) -> Self {
        Self { strategy }
    }

    /// Authenticate a request from its raw credential sources.
    ///
    /// # Arguments
    /// * `authorization` - Value of the `Authorization` header, if any
    /// * `cookie` - Value of the session cookie, if any
    ///
    /// # Returns
    /// Context to attach to the request
    ///
    /// # Errors
    /// * `MissingCredential` - No token presented
    /// * `Revoked` - Session superseded or logged out
    /// * `Expired` - Session timed out
    /// * `Infrastructure` - Session store failure, not an authentication judgement
    /// * `InvalidToken` - Anything else
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
        cookie: Option<&str>,
    ) -> Result<AuthenticatedContext, AuthError> {
        let token = extract_token(authorization, cookie)?;

        self.strategy
            .validate(token)
            .await
            .map(AuthenticatedContext::from)
            .map_err(classify)
    }
}

fn classify(err: AuthError) -> AuthError {
    match err {
        AuthError::MissingCredential
        | AuthError::Revoked
        | AuthError::Expired
        | AuthError::InvalidToken
        | AuthError::Infrastructure(_) => err,
        AuthError::EmptyIdentity | AuthError::Configuration(_) => AuthError::InvalidToken,
    }
}
