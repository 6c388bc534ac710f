use std::time::Duration;

use async_trait::async_trait;
use auth::SessionStore;
use auth::StoreError;
use redis::aio::ConnectionManager;
use redis::RedisError;

use crate::config::RedisConfig;

/// Session store backed by Redis string keys with `EX` expiry.
///
/// Redis applies the TTL itself, so evicted sessions simply disappear.
#[derive(Clone)]
pub struct RedisSessionStore {
    connection: ConnectionManager,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Connect to Redis and build the store.
    ///
    /// # Errors
    /// * `RedisError` - URL is invalid or the initial connection failed
    pub async fn connect(config: &RedisConfig) -> Result<Self, RedisError> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self {
            connection,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn key(&self, identity: &str) -> String {
        format!("{}{}", self.key_prefix, identity)
    }
}

/// Redis expiry is whole seconds; round up so the record never expires before its token.
fn expiry_seconds(ttl: Duration) -> u64 {
    let seconds = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    seconds.max(1)
}

fn unavailable(err: RedisError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut connection = self.connection.clone();

        redis::cmd("GET")
            .arg(self.key(key))
            .query_async::<_, Option<String>>(&mut connection)
            .await
            .map_err(unavailable)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();

        redis::cmd("SET")
            .arg(self.key(key))
            .arg(value)
            .arg("EX")
            .arg(expiry_seconds(ttl))
            .query_async::<_, ()>(&mut connection)
            .await
            .map_err(unavailable)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();

        redis::cmd("DEL")
            .arg(self.key(key))
            .query_async::<_, ()>(&mut connection)
            .await
            .map_err(unavailable)
    }
}
