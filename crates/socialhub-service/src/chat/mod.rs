//! Direct messages between friends.

pub mod memory;
pub mod service;

pub use memory::InMemoryChatStore;
pub use service::{ChatDraft, ChatService, ChatView};
