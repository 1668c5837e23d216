//! Core traits defined in `socialhub-core` and implemented by other crates.

pub mod chat;
pub mod directory;
pub mod store;
pub mod token;

pub use chat::ChatStore;
pub use directory::UserDirectory;
pub use store::{KeyValueStore, KeyValueStoreExt, StoreValue, TTL_MISSING, TTL_PERSISTENT};
pub use token::TokenLifetime;
