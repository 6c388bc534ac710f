use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::user::models::User;

/// Port for session lifecycle operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and start a session, superseding any previous one.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `StoreUnavailable` - Session could not be stored
    /// * `Directory` - User lookup failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, SessionError>;

    /// End the session of `identity`. Succeeds if none is active.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Session store failed
    async fn logout(&self, identity: &str) -> Result<(), SessionError>;

    /// Retrieve the account behind an authenticated identity.
    ///
    /// # Errors
    /// * `UserNotFound` - Account no longer exists
    /// * `Directory` - User lookup failed
    async fn current_user(&self, identity: &str) -> Result<User, SessionError>;
}
