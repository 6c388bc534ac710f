use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::errors::AuthError;
use super::TokenStrategy;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::session::SessionRegistry;
use crate::session::SessionStore;

/// Tunables for session issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Validity window of a token and TTL of its session record
    pub token_ttl: Duration,

    /// Upper bound for a single session store call
    pub store_timeout: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(8 * 60 * 60),
            store_timeout: Duration::from_secs(2),
        }
    }
}

/// A freshly issued session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Token strategy pairing signed JWTs with a one-entry-per-identity registry.
///
/// A token is accepted only while the registry still holds exactly that
/// token for its identity, so a new login or a logout revokes it at once.
pub struct JwtSessionStrategy<S: SessionStore + ?Sized, C: Clock = SystemClock> {
    codec: JwtHandler,
    registry: SessionRegistry<S>,
    token_ttl: Duration,
    claims_ttl: chrono::Duration,
    clock: C,
}

impl<S: SessionStore + ?Sized> JwtSessionStrategy<S, SystemClock> {
    /// Create a strategy signing with `secret` and storing sessions in `store`.
    ///
    /// # Arguments
    /// * `secret` - Process-wide signing secret, at least 32 bytes
    /// * `store` - Session store backing the registry
    /// * `settings` - Token lifetime and store timeout
    ///
    /// # Errors
    /// * `Configuration` - Secret is too short or the token TTL is zero or out of range
    pub fn new(secret: &[u8], store: Arc<S>, settings: SessionSettings) -> Result<Self, AuthError> {
        let codec = JwtHandler::new(secret)?;

        if settings.token_ttl.as_secs() == 0 {
            return Err(AuthError::Configuration(
                "token ttl must be at least one second".to_string(),
            ));
        }
        let claims_ttl = chrono::Duration::from_std(settings.token_ttl)
            .map_err(|e| AuthError::Configuration(format!("token ttl out of range: {}", e)))?;

        Ok(Self {
            codec,
            registry: SessionRegistry::new(store, settings.store_timeout),
            token_ttl: settings.token_ttl,
            claims_ttl,
            clock: SystemClock,
        })
    }
}

impl<S: SessionStore + ?Sized, C: Clock> JwtSessionStrategy<S, C> {
    /// Replace the clock used for issuance and expiry checks.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> JwtSessionStrategy<S, C2> {
        JwtSessionStrategy {
            codec: self.codec,
            registry: self.registry,
            token_ttl: self.token_ttl,
            claims_ttl: self.claims_ttl,
            clock,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

#[async_trait]
impl<S: SessionStore + ?Sized, C: Clock> TokenStrategy for JwtSessionStrategy<S, C> {
    async fn issue(&self, identity: &str) -> Result<IssuedToken, AuthError> {
        if identity.is_empty() {
            return Err(AuthError::EmptyIdentity);
        }

        let claims = SessionClaims::issue(identity, self.clock.now(), self.claims_ttl);
        let token = self.codec.encode(&claims)?;

        self.registry
            .put(identity, &token, self.token_ttl)
            .await
            .map_err(|e| {
                tracing::error!(identity = %identity, error = %e, "Failed to store session");
                AuthError::from(e)
            })?;

        tracing::info!(
            identity = %identity,
            session_id = %claims.session_id,
            expires_at = %claims.expires_at(),
            "Session issued"
        );

        Ok(IssuedToken { token, claims })
    }

    async fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let decoded = self.codec.decode_at(token, self.clock.now()).map_err(|e| {
            tracing::debug!(error = %e, "Rejected undecodable token");
            AuthError::InvalidToken
        })?;
        let claims = decoded.claims;

        let stored = self.registry.get(claims.identity()).await.map_err(|e| {
            tracing::error!(identity = %claims.identity(), error = %e, "Failed to read session");
            AuthError::from(e)
        })?;

        // Registry mismatch wins over expiry: a superseded token is revoked
        match stored {
            None => {
                tracing::debug!(
                    identity = %claims.identity(),
                    session_id = %claims.session_id,
                    "No active session"
                );
                return Err(AuthError::Revoked);
            }
            Some(active) if active != token => {
                tracing::debug!(
                    identity = %claims.identity(),
                    session_id = %claims.session_id,
                    "Session superseded"
                );
                return Err(AuthError::Revoked);
            }
            Some(_) => {}
        }

        if decoded.expired {
            tracing::debug!(
                identity = %claims.identity(),
                session_id = %claims.session_id,
                "Session expired"
            );
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }

    async fn invalidate(&self, identity: &str) -> Result<(), AuthError> {
        self.registry.delete(identity).await.map_err(|e| {
            tracing::error!(identity = %identity, error = %e, "Failed to delete session");
            AuthError::from(e)
        })?;

        tracing::info!(identity = %identity, "Session invalidated");
        Ok(())
    }
}
