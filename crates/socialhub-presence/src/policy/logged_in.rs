//! "Logged in is online": presence follows the token lifetime alone.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use socialhub_cache::keys;
use socialhub_core::result::AppResult;
use socialhub_core::traits::{KeyValueStore, TokenLifetime};

use super::record_ttl;

/// A user is online while their most recently presented token is valid.
#[derive(Debug, Clone)]
pub struct LoggedInIsOnline {
    store: Arc<dyn KeyValueStore>,
}

impl LoggedInIsOnline {
    /// Create the policy over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Write `logged_in=1` with a TTL equal to the token's remaining lifetime.
    pub async fn set_key(&self, user_id: Uuid, token: &dyn TokenLifetime) -> AppResult<()> {
        let Some(ttl) = record_ttl(token, Utc::now()) else {
            debug!(%user_id, "Token has no lifetime left, presence not recorded");
            return Ok(());
        };

        self.store
            .hash_set(&keys::presence(user_id), keys::FIELD_LOGGED_IN, "1", &[], Some(ttl))
            .await?;

        debug!(%user_id, ttl_seconds = ttl.as_secs(), "Presence refreshed");
        Ok(())
    }

    /// Online while the presence record has time to live.
    pub async fn is_online(&self, user_id: Uuid) -> AppResult<bool> {
        let ttl = self.store.time_to_live(&keys::presence(user_id)).await?;
        Ok(ttl > 0)
    }
}
