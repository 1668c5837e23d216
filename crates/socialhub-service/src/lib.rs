//! # socialhub-service
//!
//! Business logic service layer for SocialHub. Each service orchestrates the
//! user directory, the chat store, authentication primitives and the presence
//! engine to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references or cheap clones.

pub mod account;
pub mod chat;
pub mod user;

pub use account::{AccountService, SignUp, SignUpOutcome};
pub use chat::{ChatDraft, ChatService, ChatView, InMemoryChatStore};
pub use user::{FriendView, UserProfile, UserService};
