//! Store manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use socialhub_core::config::CacheConfig;
use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;
use socialhub_core::traits::KeyValueStore;

/// Store manager that wraps the configured key-value backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store.
    inner: Arc<dyn KeyValueStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn KeyValueStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis key-value store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisStore::new(
                    client,
                    config.default_ttl_seconds,
                ))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory key-value store");
                let store = crate::memory::MemoryStore::new(config.default_ttl_seconds);
                store.spawn_sweeper(Duration::from_secs(config.memory.sweep_interval_seconds));
                Arc::new(store)
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }
}

#[async_trait]
impl KeyValueStore for StoreManager {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set_default(key, value).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        self.inner.compare_and_delete(key, expected).await
    }

    async fn hash_set(
        &self,
        name: &str,
        field: &str,
        value: &str,
        other_fields: &[(&str, &str)],
        ttl: Option<Duration>,
    ) -> AppResult<()> {
        self.inner
            .hash_set(name, field, value, other_fields, ttl)
            .await
    }

    async fn hash_get(&self, name: &str, field: &str) -> AppResult<Option<String>> {
        self.inner.hash_get(name, field).await
    }

    async fn time_to_live(&self, key: &str) -> AppResult<i64> {
        self.inner.time_to_live(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
