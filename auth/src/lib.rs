//! Single-session token authentication
//!
//! Provides the session core shared by services:
//! - Signed session tokens (JWT, HS256) carrying identity claims
//! - A session registry holding one live token per identity in a TTL store
//! - A token strategy issuing, validating and invalidating sessions
//! - An auth gate classifying request credentials
//! - Credential verification (Argon2id)
//!
//! A token is accepted only while it is the token the registry holds for
//! its identity. Logging in again or logging out revokes it immediately.
//!
//! # Examples
//!
//! ## Issue and validate
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AuthError, InMemorySessionStore, JwtSessionStrategy, SessionSettings, TokenStrategy};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = Arc::new(InMemorySessionStore::new());
//! let strategy = JwtSessionStrategy::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     store,
//!     SessionSettings::default(),
//! )
//! .unwrap();
//!
//! let first = strategy.issue("a@x.com").await.unwrap();
//! let claims = strategy.validate(&first.token).await.unwrap();
//! assert_eq!(claims.identity(), "a@x.com");
//!
//! // Logging in again supersedes the first session
//! let second = strategy.issue("a@x.com").await.unwrap();
//! assert_eq!(strategy.validate(&first.token).await, Err(AuthError::Revoked));
//! assert!(strategy.validate(&second.token).await.is_ok());
//! # });
//! ```

pub mod authenticator;
pub mod clock;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod session;
pub mod strategy;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use gate::AuthGate;
pub use gate::AuthenticatedContext;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::Argon2Verifier;
pub use password::CredentialVerifier;
pub use password::PasswordError;
pub use session::InMemorySessionStore;
pub use session::SessionRegistry;
pub use session::SessionStore;
pub use session::StoreError;
pub use strategy::AuthError;
pub use strategy::IssuedToken;
pub use strategy::JwtSessionStrategy;
pub use strategy::SessionSettings;
pub use strategy::TokenStrategy;
