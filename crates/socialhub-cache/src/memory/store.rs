//! In-memory store with Redis-compatible expiry semantics.
//!
//! Expired entries are invisible to every read as soon as their deadline
//! passes; the optional sweeper only reclaims memory.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;
use socialhub_core::traits::{KeyValueStore, TTL_MISSING, TTL_PERSISTENT};

#[derive(Debug, Clone)]
enum Value {
    Scalar(String),
    Hash(HashMap<String, String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

fn wrong_type(key: &str) -> AppError {
    AppError::cache(format!(
        "WRONGTYPE Operation against key '{key}' holding the wrong kind of value"
    ))
}

/// In-memory key-value store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Live and not-yet-swept entries.
    entries: Arc<DashMap<String, Entry>>,
    /// TTL used by `set_default`.
    default_ttl: Duration,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new(default_ttl_seconds: u64) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    /// Periodically drop expired entries. A zero interval disables sweeping.
    ///
    /// The task stops on its own once every clone of the store is dropped.
    pub fn spawn_sweeper(&self, interval: Duration) {
        if interval.is_zero() {
            return;
        }
        let entries: Weak<DashMap<String, Entry>> = Arc::downgrade(&self.entries);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let Some(entries) = entries.upgrade() else {
                    break;
                };
                let removed = purge(&entries);
                if removed > 0 {
                    debug!(removed, "Swept expired store entries");
                }
            }
        });
    }

    /// Drop expired entries now. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        purge(&self.entries)
    }

    /// Number of entries currently held, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn live(&self, key: &str) -> Option<Entry> {
        let now = Instant::now();
        self.entries
            .get(key)
            .map(|e| e.value().clone())
            .filter(|e| e.is_live(now))
    }
}

fn purge(entries: &DashMap<String, Entry>) -> usize {
    let now = Instant::now();
    let before = entries.len();
    entries.retain(|_, entry| entry.is_live(now));
    before.saturating_sub(entries.len())
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        if ttl.as_secs() == 0 {
            self.entries.remove(key);
            return Ok(());
        }
        self.entries.insert(
            key.to_string(),
            Entry {
                value: Value::Scalar(value.to_string()),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match self.live(key) {
            Some(Entry {
                value: Value::Scalar(s),
                ..
            }) => Ok(Some(s)),
            Some(_) => Err(wrong_type(key)),
            None => Ok(None),
        }
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        let now = Instant::now();
        let removed = self.entries.remove_if(key, |_, entry| {
            entry.is_live(now) && matches!(&entry.value, Value::Scalar(s) if s == expected)
        });
        Ok(removed.is_some())
    }

    async fn hash_set(
        &self,
        name: &str,
        field: &str,
        value: &str,
        other_fields: &[(&str, &str)],
        ttl: Option<Duration>,
    ) -> AppResult<()> {
        if ttl.is_some_and(|t| t.as_secs() == 0) {
            self.entries.remove(name);
            return Ok(());
        }

        let now = Instant::now();
        // The shard lock is held for the whole update, so fields and expiry change together.
        let mut entry = self.entries.entry(name.to_string()).or_insert_with(|| Entry {
            value: Value::Hash(HashMap::new()),
            expires_at: None,
        });

        if !entry.is_live(now) {
            *entry = Entry {
                value: Value::Hash(HashMap::new()),
                expires_at: None,
            };
        }

        let Value::Hash(fields) = &mut entry.value else {
            return Err(wrong_type(name));
        };
        fields.insert(field.to_string(), value.to_string());
        for (k, v) in other_fields {
            fields.insert((*k).to_string(), (*v).to_string());
        }

        if let Some(ttl) = ttl {
            entry.expires_at = Some(now + ttl);
        }
        Ok(())
    }

    async fn hash_get(&self, name: &str, field: &str) -> AppResult<Option<String>> {
        match self.live(name) {
            Some(Entry {
                value: Value::Hash(fields),
                ..
            }) => Ok(fields.get(field).cloned()),
            Some(_) => Err(wrong_type(name)),
            None => Ok(None),
        }
    }

    async fn time_to_live(&self, key: &str) -> AppResult<i64> {
        let now = Instant::now();
        let Some(entry) = self.live(key) else {
            return Ok(TTL_MISSING);
        };
        match entry.expires_at {
            None => Ok(TTL_PERSISTENT),
            Some(deadline) => {
                // Rounded to the nearest second, as Redis does.
                let millis = deadline.saturating_duration_since(now).as_millis();
                Ok(((millis + 500) / 1000) as i64)
            }
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
