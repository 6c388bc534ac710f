use async_trait::async_trait;

use crate::jwt::SessionClaims;

pub mod errors;
pub mod jwt_session;

pub use errors::AuthError;
pub use jwt_session::IssuedToken;
pub use jwt_session::JwtSessionStrategy;
pub use jwt_session::SessionSettings;

/// Issue, validate and invalidate single-session tokens.
#[async_trait]
pub trait TokenStrategy: Send + Sync + 'static {
    /// Start a new session for `identity`, superseding any existing one.
    ///
    /// # Returns
    /// Signed token and the claims it carries
    ///
    /// # Errors
    /// * `EmptyIdentity` - Identity is empty
    /// * `Configuration` - Token could not be signed
    /// * `Infrastructure` - Session store write failed or timed out
    async fn issue(&self, identity: &str) -> Result<IssuedToken, AuthError>;

    /// Check that `token` is authentic and still the active session.
    ///
    /// # Returns
    /// Claims carried by the token
    ///
    /// # Errors
    /// * `InvalidToken` - Signature or structure is invalid
    /// * `Revoked` - Session was superseded, logged out, or evicted by the store
    /// * `Expired` - Token is still the active session but aged out
    /// * `Infrastructure` - Session store read failed or timed out
    async fn validate(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// End the active session for `identity`. Succeeds if there is none.
    ///
    /// # Errors
    /// * `Infrastructure` - Session store delete failed or timed out
    async fn invalidate(&self, identity: &str) -> Result<(), AuthError>;
}
