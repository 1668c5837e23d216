//! Short-lived sign-up confirmation PINs.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use tracing::debug;
use uuid::Uuid;

use socialhub_cache::{BoundedStore, keys};
use socialhub_core::config::AuthConfig;
use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;
use socialhub_core::traits::KeyValueStore;

/// Issues and checks the numeric PIN a new account must confirm.
///
/// A PIN is made of distinct digits and lives in the store under
/// `sign_up_confirmation_pin:{user_id}` until it expires or is used. Store
/// calls give up after `store_timeout`.
#[derive(Debug, Clone)]
pub struct ConfirmationPins {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
    length: usize,
}

impl ConfirmationPins {
    /// Create a PIN issuer from auth configuration.
    pub fn new(config: &AuthConfig, store: Arc<dyn KeyValueStore>, store_timeout: Duration) -> Self {
        Self {
            store: Arc::new(BoundedStore::new(store, store_timeout)),
            ttl: Duration::from_secs(config.pin_ttl_seconds),
            length: config.pin_length.clamp(1, 10),
        }
    }

    /// Generate and persist a fresh PIN for `user_id`, replacing any earlier one.
    pub async fn issue(&self, user_id: Uuid) -> AppResult<String> {
        let pin = generate_pin(self.length);
        self.store
            .set(&keys::sign_up_confirmation_pin(user_id), &pin, self.ttl)
            .await?;
        debug!(%user_id, ttl_secs = self.ttl.as_secs(), "Confirmation PIN issued");
        Ok(pin)
    }

    /// Check `pin` for `user_id` and consume it on success.
    ///
    /// Check and consumption are one atomic store step, so a PIN confirms at
    /// most once. Any other PIN is a validation error and leaves the stored
    /// one in place.
    pub async fn redeem(&self, user_id: Uuid, pin: &str) -> AppResult<()> {
        let key = keys::sign_up_confirmation_pin(user_id);
        if self.store.compare_and_delete(&key, pin.trim()).await? {
            debug!(%user_id, "Confirmation PIN redeemed");
            Ok(())
        } else {
            Err(AppError::validation("Invalid or expired confirmation PIN"))
        }
    }
}

/// A PIN of `length` distinct decimal digits.
fn generate_pin(length: usize) -> String {
    let mut digits: Vec<u8> = (0..10).collect();
    digits.shuffle(&mut rand::rng());
    digits
        .into_iter()
        .take(length)
        .map(|d| char::from(b'0' + d))
        .collect()
}
