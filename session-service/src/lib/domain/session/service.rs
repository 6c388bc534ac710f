use std::sync::Arc;

use async_trait::async_trait;
use auth::Argon2Verifier;
use auth::AuthGate;
use auth::Authenticator;
use auth::TokenStrategy;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserDirectory;

/// Domain service implementation for session operations.
pub struct SessionService<UD, TS>
where
    UD: UserDirectory,
    TS: TokenStrategy + ?Sized,
{
    directory: Arc<UD>,
    authenticator: Authenticator<Argon2Verifier, TS>,
}

impl<UD, TS> SessionService<UD, TS>
where
    UD: UserDirectory,
    TS: TokenStrategy + ?Sized,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - Account lookup
    /// * `strategy` - Token strategy shared with the auth gate
    pub fn new(directory: Arc<UD>, strategy: Arc<TS>) -> Self {
        Self {
            directory,
            authenticator: Authenticator::new(Argon2Verifier::new(), strategy),
        }
    }

    /// Auth gate over the same token strategy this service issues with.
    pub fn gate(&self) -> AuthGate<TS> {
        self.authenticator.gate()
    }
}

#[async_trait]
impl<UD, TS> SessionServicePort for SessionService<UD, TS>
where
    UD: UserDirectory,
    TS: TokenStrategy + ?Sized,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, SessionError> {
        let Some(user) = self.directory.find_by_email(&command.email).await? else {
            return Err(self
                .authenticator
                .reject_unknown(command.email.as_str(), &command.password)
                .into());
        };

        let session = self
            .authenticator
            .login(user.email.as_str(), &command.password, &user.password_hash)
            .await?;

        Ok(LoginOutcome { user, session })
    }

    async fn logout(&self, identity: &str) -> Result<(), SessionError> {
        self.authenticator.logout(identity).await?;
        tracing::info!(identity = %identity, "User logged out");
        Ok(())
    }

    async fn current_user(&self, identity: &str) -> Result<User, SessionError> {
        let email = EmailAddress::new(identity.to_string())?;

        self.directory
            .find_by_email(&email)
            .await?
            .ok_or(SessionError::UserNotFound(identity.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::Instant;

    use auth::AuthError;
    use auth::CredentialVerifier;
    use auth::InMemorySessionStore;
    use auth::IssuedToken;
    use auth::JwtSessionStrategy;
    use auth::SessionClaims;
    use auth::SessionSettings;
    use auth::StoreError;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::DirectoryError;

    mock! {
        pub TestUserDirectory {}

        #[async_trait]
        impl UserDirectory for TestUserDirectory {
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DirectoryError>;
        }
    }

    mock! {
        pub TestTokenStrategy {}

        #[async_trait]
        impl TokenStrategy for TestTokenStrategy {
            async fn issue(&self, identity: &str) -> Result<IssuedToken, AuthError>;
            async fn validate(&self, token: &str) -> Result<SessionClaims, AuthError>;
            async fn invalidate(&self, identity: &str) -> Result<(), AuthError>;
        }
    }

    fn alice() -> User {
        User {
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            username: "alice".to_string(),
            password_hash: Argon2Verifier::new().hash("password123").unwrap(),
        }
    }

    fn strategy() -> Arc<JwtSessionStrategy<InMemorySessionStore>> {
        Arc::new(
            JwtSessionStrategy::new(
                b"test_secret_key_at_least_32_bytes!",
                Arc::new(InMemorySessionStore::new()),
                SessionSettings::default(),
            )
            .unwrap(),
        )
    }

    fn directory_with(user: User) -> MockTestUserDirectory {
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_email()
            .returning(move |email| Ok((email == &user.email).then(|| user.clone())));
        directory
    }

    fn login_command(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: EmailAddress::new(email.to_string()).unwrap(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let strategy = strategy();
        let service = SessionService::new(Arc::new(directory_with(alice())), Arc::clone(&strategy));

        let outcome = service
            .login(login_command("a@x.com", "password123"))
            .await
            .expect("Login failed");

        assert_eq!(outcome.user.username, "alice");
        let claims = strategy.validate(&outcome.session.token).await.unwrap();
        assert_eq!(claims.identity(), "a@x.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = SessionService::new(Arc::new(directory_with(alice())), strategy());

        let result = service.login(login_command("a@x.com", "wrong")).await;
        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_does_not_issue() {
        let mut strategy = MockTestTokenStrategy::new();
        strategy.expect_issue().times(0);

        let service = SessionService::new(Arc::new(directory_with(alice())), Arc::new(strategy));

        let result = service.login(login_command("b@x.com", "password123")).await;
        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_store_failure() {
        let mut strategy = MockTestTokenStrategy::new();
        strategy.expect_issue().times(1).returning(|_| {
            Err(AuthError::Infrastructure(StoreError::Unavailable(
                "connection refused".to_string(),
            )))
        });

        let service = SessionService::new(Arc::new(directory_with(alice())), Arc::new(strategy));

        let result = service.login(login_command("a@x.com", "password123")).await;
        assert!(matches!(result, Err(SessionError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_logout_revokes_session() {
        let strategy = strategy();
        let service = SessionService::new(Arc::new(directory_with(alice())), Arc::clone(&strategy));
        let outcome = service
            .login(login_command("a@x.com", "password123"))
            .await
            .unwrap();

        service.logout("a@x.com").await.unwrap();
        service.logout("a@x.com").await.unwrap();

        assert_eq!(
            strategy.validate(&outcome.session.token).await,
            Err(AuthError::Revoked)
        );
    }

    #[tokio::test]
    async fn test_current_user() {
        let service = SessionService::new(Arc::new(directory_with(alice())), strategy());

        let user = service.current_user("a@x.com").await.unwrap();
        assert_eq!(user.username, "alice");

        let missing = service.current_user("b@x.com").await;
        assert!(matches!(missing, Err(SessionError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_directory_failure_is_surfaced() {
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(DirectoryError::Unavailable("timeout".to_string())));

        let service = SessionService::new(Arc::new(directory), strategy());

        let result = service.login(login_command("a@x.com", "password123")).await;
        assert!(matches!(result, Err(SessionError::Directory(_))));
    }

    async fn fastest_login(service: &impl SessionServicePort, email: &str) -> Duration {
        let mut fastest = Duration::MAX;
        for _ in 0..3 {
            let started = Instant::now();
            let result = service.login(login_command(email, "wrong")).await;
            assert!(matches!(result, Err(SessionError::InvalidCredentials)));
            fastest = fastest.min(started.elapsed());
        }
        fastest
    }

    #[tokio::test]
    async fn test_unknown_user_costs_a_password_check() {
        let service = SessionService::new(Arc::new(directory_with(alice())), strategy());

        let known = fastest_login(&service, "a@x.com").await;
        let unknown = fastest_login(&service, "b@x.com").await;

        // Both paths run one argon2 verification
        assert!(
            unknown * 4 >= known,
            "unknown account rejected in {:?}, wrong password in {:?}",
            unknown,
            known
        );
    }

    #[tokio::test]
    async fn test_gate_shares_the_issuing_strategy() {
        let service = SessionService::new(Arc::new(directory_with(alice())), strategy());
        let outcome = service
            .login(login_command("a@x.com", "password123"))
            .await
            .unwrap();

        let header = format!("Bearer {}", outcome.session.token);
        let context = service.gate().authenticate(Some(&header), None).await.unwrap();
        assert_eq!(context.identity, "a@x.com");
    }
}
