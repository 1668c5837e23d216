//! "UI open is online": presence also requires the client UI to be in focus.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use socialhub_cache::keys;
use socialhub_core::result::AppResult;
use socialhub_core::traits::{KeyValueStore, KeyValueStoreExt, TokenLifetime};

use super::record_ttl;

/// A user is online while logged in and their client reports the UI as open.
///
/// Authentication marks the UI as open; clients flip the flag through
/// [`UiOpenIsOnline::set_online_status`] on focus and blur.
#[derive(Debug, Clone)]
pub struct UiOpenIsOnline {
    store: Arc<dyn KeyValueStore>,
}

impl UiOpenIsOnline {
    /// Create the policy over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Write `logged_in=1, ui_open=1` with a TTL equal to the token's remaining lifetime.
    pub async fn set_key(&self, user_id: Uuid, token: &dyn TokenLifetime) -> AppResult<()> {
        self.write(user_id, token, true).await
    }

    /// Record a client-reported UI focus change.
    ///
    /// The record TTL is reset to the token's remaining lifetime at call time.
    pub async fn set_online_status(
        &self,
        user_id: Uuid,
        token: &dyn TokenLifetime,
        online: bool,
    ) -> AppResult<()> {
        self.write(user_id, token, online).await
    }

    /// Online while the record is alive and `ui_open` is set.
    pub async fn is_online(&self, user_id: Uuid) -> AppResult<bool> {
        let key = keys::presence(user_id);
        if self.store.time_to_live(&key).await? <= 0 {
            return Ok(false);
        }
        let ui_open: Option<bool> = self.store.hash_get_as(&key, keys::FIELD_UI_OPEN).await?;
        Ok(ui_open.unwrap_or(false))
    }

    async fn write(&self, user_id: Uuid, token: &dyn TokenLifetime, ui_open: bool) -> AppResult<()> {
        let Some(ttl) = record_ttl(token, Utc::now()) else {
            debug!(%user_id, "Token has no lifetime left, presence not recorded");
            return Ok(());
        };

        let flag = if ui_open { "1" } else { "0" };
        self.store
            .hash_set(
                &keys::presence(user_id),
                keys::FIELD_LOGGED_IN,
                "1",
                &[(keys::FIELD_UI_OPEN, flag)],
                Some(ttl),
            )
            .await?;

        debug!(%user_id, ui_open, ttl_seconds = ttl.as_secs(), "Presence refreshed");
        Ok(())
    }
}
