//! # socialhub-cache
//!
//! Expiring key-value store adapters for SocialHub. Supports two modes:
//!
//! - **memory**: In-process store with per-entry expiry, backed by
//!   [dashmap](https://crates.io/crates/dashmap)
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration, and
//! [`BoundedStore`] puts a deadline on every call for callers that must not
//! wait on a stalled backend.

pub mod bounded;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use bounded::BoundedStore;
pub use provider::StoreManager;
