use std::sync::Arc;

use crate::gate::AuthGate;
use crate::password::CredentialVerifier;
use crate::password::PasswordError;
use crate::strategy::AuthError;
use crate::strategy::IssuedToken;
use crate::strategy::TokenStrategy;

/// Login / logout coordinator over a credential verifier and a token strategy.
pub struct Authenticator<V: CredentialVerifier, T: TokenStrategy + ?Sized> {
    verifier: V,
    strategy: Arc<T>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Session error: {0}")]
    Session(#[from] AuthError),
}

impl<V: CredentialVerifier, T: TokenStrategy + ?Sized> Authenticator<V, T> {
    pub fn new(verifier: V, strategy: Arc<T>) -> Self {
        Self { verifier, strategy }
    }

    /// Verify credentials and start a new session for `identity`.
    ///
    /// A successful login supersedes whatever session `identity` had before.
    ///
    /// # Arguments
    /// * `identity` - Identity logging in
    /// * `secret` - Plaintext secret to verify
    /// * `stored` - Stored credential for `identity`
    ///
    /// # Errors
    /// * `InvalidCredentials` - Secret does not match
    /// * `PasswordError` - Stored credential is unreadable
    /// * `Session` - Token could not be issued
    pub async fn login(
        &self,
        identity: &str,
        secret: &str,
        stored: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.verifier.verify(secret, stored)? {
            tracing::warn!(identity = %identity, "Rejected login with invalid credentials");
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.strategy.issue(identity).await?)
    }

    /// Reject a login for an identity that has no stored credential.
    ///
    /// The secret is still run through the verifier, against its decoy, so
    /// unknown and known identities cannot be told apart by response time.
    pub fn reject_unknown(&self, identity: &str, secret: &str) -> AuthenticationError {
        if let Err(e) = self.verifier.verify(secret, self.verifier.decoy()) {
            tracing::error!(error = %e, "Decoy credential could not be verified");
        }
        tracing::warn!(identity = %identity, "Rejected login for unknown identity");
        AuthenticationError::InvalidCredentials
    }

    /// End the active session of `identity`.
    pub async fn logout(&self, identity: &str) -> Result<(), AuthenticationError> {
        Ok(self.strategy.invalidate(identity).await?)
    }

    /// Gate sharing this authenticator's token strategy.
    pub fn gate(&self) -> AuthGate<T> {
        AuthGate::new(Arc::clone(&self.strategy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::AuthenticatedContext;
    use crate::password::Argon2Verifier;
    use crate::session::InMemorySessionStore;
    use crate::strategy::JwtSessionStrategy;
    use crate::strategy::SessionSettings;

    type TestAuthenticator =
        Authenticator<Argon2Verifier, JwtSessionStrategy<InMemorySessionStore>>;

    fn authenticator() -> TestAuthenticator {
        let strategy = JwtSessionStrategy::new(
            b"test_secret_key_at_least_32_bytes!",
            Arc::new(InMemorySessionStore::new()),
            SessionSettings::default(),
        )
        .expect("Failed to build strategy");
        Authenticator::new(Argon2Verifier::new(), Arc::new(strategy))
    }

    fn hash(secret: &str) -> String {
        Argon2Verifier::new().hash(secret).expect("Failed to hash password")
    }

    async fn authorize(
        authenticator: &TestAuthenticator,
        token: &str,
    ) -> Result<AuthenticatedContext, AuthError> {
        let header = format!("Bearer {}", token);
        authenticator.gate().authenticate(Some(&header), None).await
    }

    #[tokio::test]
    async fn test_login_success() {
        let authenticator = authenticator();
        let hash = hash("my_password");

        let issued = authenticator
            .login("a@x.com", "my_password", &hash)
            .await
            .expect("Login failed");

        let context = authorize(&authenticator, &issued.token)
            .await
            .expect("Token validation failed");
        assert_eq!(context.identity, "a@x.com");
        assert_eq!(context.session_id, issued.claims.session_id);
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let authenticator = authenticator();
        let hash = hash("my_password");

        let result = authenticator.login("a@x.com", "wrong_password", &hash).await;
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_relogin_revokes_previous_session() {
        let authenticator = authenticator();
        let hash = hash("my_password");

        let first = authenticator.login("a@x.com", "my_password", &hash).await.unwrap();
        let second = authenticator.login("a@x.com", "my_password", &hash).await.unwrap();

        assert_eq!(
            authorize(&authenticator, &first.token).await,
            Err(AuthError::Revoked)
        );
        assert!(authorize(&authenticator, &second.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_then_gate_rejects() {
        let authenticator = authenticator();
        let hash = hash("my_password");
        let issued = authenticator.login("a@x.com", "my_password", &hash).await.unwrap();

        let gate = authenticator.gate();
        let header = format!("Bearer {}", issued.token);
        assert!(gate.authenticate(Some(&header), None).await.is_ok());

        authenticator.logout("a@x.com").await.unwrap();
        authenticator.logout("a@x.com").await.unwrap();

        assert_eq!(
            gate.authenticate(Some(&header), None).await,
            Err(AuthError::Revoked)
        );
    }

    #[test]
    fn test_reject_unknown_identity() {
        let authenticator = authenticator();

        assert_eq!(
            authenticator.reject_unknown("ghost@x.com", "my_password"),
            AuthenticationError::InvalidCredentials
        );
    }
}
