use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::errors::StoreError;
use super::store::SessionStore;

/// Binds at most one issued token to each identity.
///
/// The underlying store is the single source of truth for whether a session
/// is still active. Every store call is bounded by `timeout`.
pub struct SessionRegistry<S: SessionStore + ?Sized> {
    store: Arc<S>,
    timeout: Duration,
}

impl<S: SessionStore + ?Sized> Clone for SessionRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            timeout: self.timeout,
        }
    }
}

impl<S: SessionStore + ?Sized> SessionRegistry<S> {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    /// Create a registry over `store` with a per-call timeout.
    pub fn new(store: Arc<S>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Store `token` as the active session for `identity`.
    ///
    /// Overwrites any existing entry, which revokes the previous token even
    /// if it has not expired yet.
    ///
    /// # Errors
    /// * `Unavailable` - Store write failed
    /// * `Timeout` - Store did not answer in time
    pub async fn put(&self, identity: &str, token: &str, ttl: Duration) -> Result<(), StoreError> {
        self.bounded(self.store.set(identity, token, ttl)).await
    }

    /// Look up the active token for `identity` without mutating it.
    ///
    /// # Errors
    /// * `Unavailable` - Store read failed
    /// * `Timeout` - Store did not answer in time
    pub async fn get(&self, identity: &str) -> Result<Option<String>, StoreError> {
        self.bounded(self.store.get(identity)).await
    }

    /// Remove the active session for `identity`, if any.
    ///
    /// # Errors
    /// * `Unavailable` - Store delete failed
    /// * `Timeout` - Store did not answer in time
    pub async fn delete(&self, identity: &str) -> Result<(), StoreError> {
        self.bounded(self.store.delete(identity)).await
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }
}
