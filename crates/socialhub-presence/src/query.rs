//! Read-only presence lookups for display code.

use tracing::warn;
use uuid::Uuid;

use crate::engine::PresenceEngine;

/// Presence facade used when rendering users.
///
/// Lookups never fail: a store error or timeout is logged and reported as
/// offline. Each call is one or two store round-trips, so listing N users
/// costs N lookups.
#[derive(Debug, Clone)]
pub struct PresenceQuery {
    engine: PresenceEngine,
}

impl PresenceQuery {
    /// Create a facade over `engine`.
    pub fn new(engine: PresenceEngine) -> Self {
        Self { engine }
    }

    /// Whether `user_id` is online under the active policy.
    pub async fn is_online(&self, user_id: Uuid) -> bool {
        match self.engine.is_online(user_id).await {
            Ok(online) => online,
            Err(e) => {
                warn!(%user_id, error = %e, "Presence lookup failed, reporting offline");
                false
            }
        }
    }

    /// Online flags for `user_ids`, in the same order.
    pub async fn online_flags(&self, user_ids: &[Uuid]) -> Vec<bool> {
        let mut flags = Vec::with_capacity(user_ids.len());
        for &user_id in user_ids {
            flags.push(self.is_online(user_id).await);
        }
        flags
    }
}
