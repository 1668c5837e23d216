//! Store doubles for tests in dependent crates.

use std::time::Duration;

use async_trait::async_trait;

use socialhub_core::result::AppResult;
use socialhub_core::traits::KeyValueStore;

/// Store that never answers any call.
#[derive(Debug, Clone, Copy, Default)]
pub struct StalledStore;

#[async_trait]
impl KeyValueStore for StalledStore {
    async fn set(&self, _: &str, _: &str, _: Duration) -> AppResult<()> {
        std::future::pending().await
    }

    async fn set_default(&self, _: &str, _: &str) -> AppResult<()> {
        std::future::pending().await
    }

    async fn get(&self, _: &str) -> AppResult<Option<String>> {
        std::future::pending().await
    }

    async fn compare_and_delete(&self, _: &str, _: &str) -> AppResult<bool> {
        std::future::pending().await
    }

    async fn hash_set(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: &[(&str, &str)],
        _: Option<Duration>,
    ) -> AppResult<()> {
        std::future::pending().await
    }

    async fn hash_get(&self, _: &str, _: &str) -> AppResult<Option<String>> {
        std::future::pending().await
    }

    async fn time_to_live(&self, _: &str) -> AppResult<i64> {
        std::future::pending().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        std::future::pending().await
    }
}
