//! Presence write and read operations against the active policy.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use socialhub_core::config::PresenceConfig;
use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;
use socialhub_core::traits::{KeyValueStore, TokenLifetime};
use socialhub_core::types::PolicyKind;

use crate::policy::OnlinePolicy;
use crate::registry::PolicyRegistry;
use crate::selector::PolicySelector;

/// Runs presence operations through whichever policy is active at call time.
///
/// Every store round-trip is bounded by the configured timeout; a timeout is
/// reported as [`ErrorKind::ServiceUnavailable`](socialhub_core::error::ErrorKind::ServiceUnavailable).
/// Callers decide whether a presence error matters to them.
#[derive(Debug, Clone)]
pub struct PresenceEngine {
    registry: PolicyRegistry,
    selector: PolicySelector,
    timeout: Duration,
}

impl PresenceEngine {
    /// Create an engine.
    pub fn new(registry: PolicyRegistry, selector: PolicySelector, timeout: Duration) -> Self {
        Self {
            registry,
            selector,
            timeout,
        }
    }

    /// Create an engine over `store` with the policy named in `config`.
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &PresenceConfig) -> AppResult<Self> {
        Ok(Self::new(
            PolicyRegistry::new(store),
            PolicySelector::from_config(config)?,
            config.store_timeout(),
        ))
    }

    /// The policy in effect right now.
    pub fn active_policy(&self) -> OnlinePolicy {
        self.registry.resolve(self.selector.current())
    }

    /// Name of the policy in effect right now.
    pub fn active_kind(&self) -> PolicyKind {
        self.selector.current()
    }

    /// The selector holding the active policy.
    pub fn selector(&self) -> &PolicySelector {
        &self.selector
    }

    /// Refresh presence for a user whose token was just verified.
    pub async fn refresh(&self, user_id: Uuid, token: &dyn TokenLifetime) -> AppResult<()> {
        let policy = self.active_policy();
        self.bounded("set_key", policy.set_key(user_id, token)).await
    }

    /// Whether `user_id` is online under the active policy.
    pub async fn is_online(&self, user_id: Uuid) -> AppResult<bool> {
        let policy = self.active_policy();
        self.bounded("is_online", policy.is_online(user_id)).await
    }

    /// Record a client-reported UI focus change.
    ///
    /// Only meaningful under `UIOpenIsOnline`; any other active policy is
    /// rejected as method-not-allowed before the store is touched.
    pub async fn set_online_status(
        &self,
        user_id: Uuid,
        token: &dyn TokenLifetime,
        online: bool,
    ) -> AppResult<()> {
        let policy = self.active_policy();
        let Some(ui_open) = policy.as_ui_open() else {
            return Err(AppError::method_not_allowed(format!(
                "UI online status requires the {} policy; active policy is {}",
                PolicyKind::UiOpenIsOnline,
                policy.kind()
            )));
        };
        self.bounded(
            "set_online_status",
            ui_open.set_online_status(user_id, token, online),
        )
        .await
    }

    /// Check that the presence store answers within the timeout.
    pub async fn store_healthy(&self) -> bool {
        let store = Arc::clone(self.registry.store());
        matches!(
            self.bounded("health_check", store.health_check()).await,
            Ok(true)
        )
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                debug!(operation, timeout_ms = self.timeout.as_millis() as u64, "Presence store call timed out");
                Err(AppError::service_unavailable(format!(
                    "Presence store did not answer {operation} within {} ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}
