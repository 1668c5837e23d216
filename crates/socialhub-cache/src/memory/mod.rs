//! In-process key-value store with per-entry expiry.

pub mod store;

pub use store::MemoryStore;
