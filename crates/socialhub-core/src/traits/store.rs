//! Key-value store trait for expiring presence and PIN state.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// `time_to_live` result for a key that does not exist (or has expired).
pub const TTL_MISSING: i64 = -2;

/// `time_to_live` result for a key that exists without an expiry.
pub const TTL_PERSISTENT: i64 = -1;

/// Trait for expiring key-value backends (Redis or in-process).
///
/// Values are stored as strings. Expiration is per key: for hashes the TTL
/// applies to the whole entry, never to single fields. The store is
/// responsible for key prefixing.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Store a scalar value that expires after `ttl`. Overwrites silently.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Store a scalar value with the configured default TTL.
    async fn set_default(&self, key: &str, value: &str) -> AppResult<()>;

    /// Get a scalar value. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Delete the scalar `key` if, and only if, it currently holds `expected`.
    ///
    /// The comparison and the delete are one atomic step: of several
    /// concurrent callers presenting the right value, exactly one sees `true`.
    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool>;

    /// Set `field` (and every pair in `other_fields`) on the hash `name`.
    ///
    /// When `ttl` is given the expiry of the whole hash is reset in the same
    /// atomic step. Without a TTL an existing expiry is left untouched.
    async fn hash_set(
        &self,
        name: &str,
        field: &str,
        value: &str,
        other_fields: &[(&str, &str)],
        ttl: Option<Duration>,
    ) -> AppResult<()>;

    /// Read one field of the hash `name`.
    async fn hash_get(&self, name: &str, field: &str) -> AppResult<Option<String>>;

    /// Seconds before `key` expires.
    ///
    /// Returns [`TTL_MISSING`] for an absent key and [`TTL_PERSISTENT`] for a
    /// key without expiry. Any value `<= 0` means the key is not alive.
    async fn time_to_live(&self, key: &str) -> AppResult<i64>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Decoding strategy for raw stored strings.
pub trait StoreValue: Sized {
    /// Convert the raw stored representation.
    fn decode(raw: &str) -> AppResult<Self>;
}

impl StoreValue for String {
    fn decode(raw: &str) -> AppResult<Self> {
        Ok(raw.to_string())
    }
}

impl StoreValue for i64 {
    fn decode(raw: &str) -> AppResult<Self> {
        raw.trim().parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Stored value '{raw}' is not an integer"),
                e,
            )
        })
    }
}

impl StoreValue for bool {
    fn decode(raw: &str) -> AppResult<Self> {
        match raw.trim() {
            "true" | "True" => Ok(true),
            "false" | "False" => Ok(false),
            other => i64::decode(other).map(|n| n != 0),
        }
    }
}

/// Typed reads on top of any [`KeyValueStore`].
///
/// A missing key decodes to `None`; only a present but malformed value is an
/// error.
pub trait KeyValueStoreExt: KeyValueStore {
    /// Get a scalar value and decode it as `T`.
    fn get_as<T: StoreValue + Send>(
        &self,
        key: &str,
    ) -> impl Future<Output = AppResult<Option<T>>> + Send {
        async move {
            match self.get(key).await? {
                Some(raw) => T::decode(&raw).map(Some),
                None => Ok(None),
            }
        }
    }

    /// Get a hash field and decode it as `T`.
    fn hash_get_as<T: StoreValue + Send>(
        &self,
        name: &str,
        field: &str,
    ) -> impl Future<Output = AppResult<Option<T>>> + Send {
        async move {
            match self.hash_get(name, field).await? {
                Some(raw) => T::decode(&raw).map(Some),
                None => Ok(None),
            }
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
