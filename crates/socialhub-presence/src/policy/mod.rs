//! Presence policy variants.
//!
//! Both variants share the same record layout (a hash keyed by user) and the
//! same TTL rule; they differ in which fields they write and how they read
//! them back.

pub mod logged_in;
pub mod ui_open;

use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use socialhub_core::result::AppResult;
use socialhub_core::traits::TokenLifetime;
use socialhub_core::types::PolicyKind;

pub use logged_in::LoggedInIsOnline;
pub use ui_open::UiOpenIsOnline;

/// The active presence strategy.
#[derive(Debug, Clone)]
pub enum OnlinePolicy {
    /// Online while logged in.
    LoggedIn(LoggedInIsOnline),
    /// Online while logged in with the UI open.
    UiOpen(UiOpenIsOnline),
}

impl OnlinePolicy {
    /// Which variant this is.
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::LoggedIn(_) => PolicyKind::LoggedInIsOnline,
            Self::UiOpen(_) => PolicyKind::UiOpenIsOnline,
        }
    }

    /// Refresh the presence record after `token` was verified for `user_id`.
    pub async fn set_key(&self, user_id: Uuid, token: &dyn TokenLifetime) -> AppResult<()> {
        match self {
            Self::LoggedIn(policy) => policy.set_key(user_id, token).await,
            Self::UiOpen(policy) => policy.set_key(user_id, token).await,
        }
    }

    /// Whether `user_id` currently counts as online.
    pub async fn is_online(&self, user_id: Uuid) -> AppResult<bool> {
        match self {
            Self::LoggedIn(policy) => policy.is_online(user_id).await,
            Self::UiOpen(policy) => policy.is_online(user_id).await,
        }
    }

    /// The UI-open variant, if that is what this policy is.
    pub fn as_ui_open(&self) -> Option<&UiOpenIsOnline> {
        match self {
            Self::UiOpen(policy) => Some(policy),
            Self::LoggedIn(_) => None,
        }
    }
}

/// TTL for a presence record written at `now` for `token`.
///
/// `None` when the token has no whole second left: such a record must not be
/// written, since it would either be rejected by the store or outlive the
/// token.
pub fn record_ttl(token: &dyn TokenLifetime, now: DateTime<Utc>) -> Option<Duration> {
    let remaining = token.remaining_seconds(now);
    (remaining > 0).then(|| Duration::from_secs(remaining as u64))
}
