//! The process-wide choice of presence policy.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use socialhub_core::config::PresenceConfig;
use socialhub_core::result::AppResult;
use socialhub_core::types::PolicyKind;

/// Live, thread-safe holder of the active [`PolicyKind`].
///
/// Resolved from configuration once at startup. Every presence operation
/// reads the current value, so [`PolicySelector::switch`] takes effect for
/// the next request without a restart. Clones share the same cell.
#[derive(Debug, Clone)]
pub struct PolicySelector {
    tx: Arc<watch::Sender<PolicyKind>>,
}

impl PolicySelector {
    /// Start with `kind` active.
    pub fn new(kind: PolicyKind) -> Self {
        let (tx, _rx) = watch::channel(kind);
        Self {
            tx: Arc::new(tx),
        }
    }

    /// Resolve the configured policy name. Unknown names are a configuration error.
    pub fn from_config(config: &PresenceConfig) -> AppResult<Self> {
        let kind: PolicyKind = config.policy.parse()?;
        info!(policy = %kind, "Online status policy selected");
        Ok(Self::new(kind))
    }

    /// The currently active policy.
    pub fn current(&self) -> PolicyKind {
        *self.tx.borrow()
    }

    /// Make `kind` the active policy. Returns the previously active one.
    pub fn switch(&self, kind: PolicyKind) -> PolicyKind {
        let previous = self.tx.send_replace(kind);
        if previous != kind {
            info!(from = %previous, to = %kind, "Online status policy switched");
        }
        previous
    }

    /// Receive a notification whenever the policy changes.
    pub fn subscribe(&self) -> watch::Receiver<PolicyKind> {
        self.tx.subscribe()
    }
}
