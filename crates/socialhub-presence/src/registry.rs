//! Builds the policy implementation for a configured policy name.

use std::sync::Arc;

use socialhub_core::traits::KeyValueStore;
use socialhub_core::types::PolicyKind;

use crate::policy::{LoggedInIsOnline, OnlinePolicy, UiOpenIsOnline};

/// Factory from [`PolicyKind`] to a ready [`OnlinePolicy`].
///
/// Policies are stateless apart from the shared store handle, so resolving
/// on every call is cheap.
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    store: Arc<dyn KeyValueStore>,
}

impl PolicyRegistry {
    /// Create a registry whose policies all use `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The policy implementation registered for `kind`.
    pub fn resolve(&self, kind: PolicyKind) -> OnlinePolicy {
        match kind {
            PolicyKind::LoggedInIsOnline => {
                OnlinePolicy::LoggedIn(LoggedInIsOnline::new(Arc::clone(&self.store)))
            }
            PolicyKind::UiOpenIsOnline => {
                OnlinePolicy::UiOpen(UiOpenIsOnline::new(Arc::clone(&self.store)))
            }
        }
    }

    /// The store shared by every policy.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}
