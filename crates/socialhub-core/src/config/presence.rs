//! Online presence configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Presence policy selection and store access limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Active policy name: `"LoggedInIsOnline"` or `"UIOpenIsOnline"`.
    #[serde(default = "default_policy")]
    pub policy: String,
    /// Upper bound for a single store round-trip made while serving a request
    /// (presence, token blocklist, confirmation PINs), in milliseconds.
    #[serde(default = "default_store_timeout")]
    pub store_timeout_ms: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            store_timeout_ms: default_store_timeout(),
        }
    }
}

impl PresenceConfig {
    /// [`Self::store_timeout_ms`] as a [`Duration`].
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

fn default_policy() -> String {
    "LoggedInIsOnline".to_string()
}

fn default_store_timeout() -> u64 {
    250
}
