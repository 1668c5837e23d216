//! Redis key-value store implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use socialhub_core::error::{AppError, ErrorKind};
use socialhub_core::result::AppResult;
use socialhub_core::traits::KeyValueStore;

use super::client::RedisClient;

/// Deletes KEYS[1] when it holds ARGV[1]; runs atomically on the server.
const COMPARE_AND_DELETE: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;

/// Redis-backed key-value store.
#[derive(Debug, Clone)]
pub struct RedisStore {
    /// Redis client.
    client: RedisClient,
    /// TTL used by `set_default`.
    default_ttl: Duration,
}

impl RedisStore {
    /// Create a new Redis store.
    pub fn new(client: RedisClient, default_ttl_seconds: u64) -> Self {
        Self {
            client,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }

    async fn delete(&self, full_key: &str) -> AppResult<()> {
        let mut conn = self.client.conn();
        let _: () = conn.del(full_key).await.map_err(Self::map_err)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.key(key);

        // SET .. EX 0 is rejected by Redis; a zero TTL means the value is already dead.
        if ttl.as_secs() == 0 {
            debug!(key = %full_key, "Zero TTL, removing key instead of writing");
            return self.delete(&full_key).await;
        }

        let mut conn = self.client.conn();
        let _: () = conn
            .set_ex(&full_key, value, ttl.as_secs())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let deleted: i64 = redis::Script::new(COMPARE_AND_DELETE)
            .key(&full_key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(deleted == 1)
    }

    async fn hash_set(
        &self,
        name: &str,
        field: &str,
        value: &str,
        other_fields: &[(&str, &str)],
        ttl: Option<Duration>,
    ) -> AppResult<()> {
        let full_key = self.client.key(name);

        if ttl.is_some_and(|t| t.as_secs() == 0) {
            debug!(key = %full_key, "Zero TTL, removing hash instead of writing");
            return self.delete(&full_key).await;
        }

        let mut items: Vec<(&str, &str)> = Vec::with_capacity(other_fields.len() + 1);
        items.push((field, value));
        items.extend_from_slice(other_fields);

        let mut conn = self.client.conn();
        let mut pipe = redis::pipe();
        // MULTI/EXEC so the hash never exists without its expiry.
        pipe.atomic().hset_multiple(&full_key, &items).ignore();
        if let Some(ttl) = ttl {
            pipe.expire(&full_key, ttl.as_secs() as i64).ignore();
        }

        let _: () = pipe.query_async(&mut conn).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn hash_get(&self, name: &str, field: &str) -> AppResult<Option<String>> {
        let full_key = self.client.key(name);
        let mut conn = self.client.conn();
        let result: Option<String> = conn.hget(&full_key, field).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn time_to_live(&self, key: &str) -> AppResult<i64> {
        let full_key = self.client.key(key);
        let mut conn = self.client.conn();
        let ttl: i64 = conn.ttl(&full_key).await.map_err(Self::map_err)?;
        Ok(ttl)
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client.ping().await
    }
}
