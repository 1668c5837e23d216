//! # socialhub-presence
//!
//! Decides whether a user is online.
//!
//! Presence is never stored as a boolean. Each successful authentication
//! writes a presence record whose TTL equals the remaining lifetime of the
//! presented token; the store's own expiry then answers "still logged in".
//! Which record is written and how it is read back is up to the active
//! [`OnlinePolicy`]:
//!
//! - [`LoggedInIsOnline`]: online while the record is alive
//! - [`UiOpenIsOnline`]: online while the record is alive and the client
//!   last reported its UI as open
//!
//! The active policy is chosen by name in configuration and can be switched
//! at runtime through the [`PolicySelector`].
//!
//! ## Modules
//!
//! - `policy` — the policy variants and TTL computation
//! - `registry` — builds the policy for a [`PolicyKind`]
//! - `selector` — live, thread-safe active-policy cell
//! - `engine` — write path used by authentication and the UI-status endpoint
//! - `query` — read path used by display code

pub mod engine;
pub mod policy;
pub mod query;
pub mod registry;
pub mod selector;

pub use engine::PresenceEngine;
pub use policy::{LoggedInIsOnline, OnlinePolicy, UiOpenIsOnline};
pub use query::PresenceQuery;
pub use registry::PolicyRegistry;
pub use selector::PolicySelector;
pub use socialhub_core::types::PolicyKind;
