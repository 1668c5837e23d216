//! Store decorator that puts a deadline on every call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;
use socialhub_core::traits::KeyValueStore;

/// Wraps a store so no call waits longer than `timeout`.
///
/// A call that misses the deadline fails with
/// [`ErrorKind::ServiceUnavailable`](socialhub_core::error::ErrorKind::ServiceUnavailable);
/// the inner future is dropped.
#[derive(Debug, Clone)]
pub struct BoundedStore {
    inner: Arc<dyn KeyValueStore>,
    timeout: Duration,
}

impl BoundedStore {
    /// Bound every call on `inner` by `timeout`.
    pub fn new(inner: Arc<dyn KeyValueStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// The per-call deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                debug!(operation, timeout_ms, "Store call timed out");
                Err(AppError::service_unavailable(format!(
                    "Store did not answer {operation} within {timeout_ms} ms"
                )))
            }
        }
    }
}

#[async_trait]
impl KeyValueStore for BoundedStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.bounded("set", self.inner.set(key, value, ttl)).await
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.bounded("set_default", self.inner.set_default(key, value))
            .await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.bounded("get", self.inner.get(key)).await
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        self.bounded(
            "compare_and_delete",
            self.inner.compare_and_delete(key, expected),
        )
        .await
    }

    async fn hash_set(
        &self,
        name: &str,
        field: &str,
        value: &str,
        other_fields: &[(&str, &str)],
        ttl: Option<Duration>,
    ) -> AppResult<()> {
        self.bounded(
            "hash_set",
            self.inner.hash_set(name, field, value, other_fields, ttl),
        )
        .await
    }

    async fn hash_get(&self, name: &str, field: &str) -> AppResult<Option<String>> {
        self.bounded("hash_get", self.inner.hash_get(name, field))
            .await
    }

    async fn time_to_live(&self, key: &str) -> AppResult<i64> {
        self.bounded("time_to_live", self.inner.time_to_live(key))
            .await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.bounded("health_check", self.inner.health_check()).await
    }
}
