use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;

use super::errors::StoreError;
use super::store::SessionStore;

mock! {
    pub TestSessionStore {}

    #[async_trait]
    impl SessionStore for TestSessionStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
        async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;
        async fn delete(&self, key: &str) -> Result<(), StoreError>;
    }
}

/// Store whose calls never complete within any sane timeout.
pub struct StalledStore;

#[async_trait]
impl SessionStore for StalledStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), StoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
}
