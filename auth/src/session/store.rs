use std::time::Duration;

use async_trait::async_trait;

use super::errors::StoreError;

/// Key-value store holding one live session per key, with automatic expiry.
///
/// Implementations must make each call atomic per key: readers never
/// observe a partially written value.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Fetch the value stored at `key`.
    ///
    /// # Returns
    /// `None` if the key never existed or its TTL elapsed
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` at `key` with expiry `ttl`, replacing any existing entry.
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Remove the entry at `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
