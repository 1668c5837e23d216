//! Chat storage trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::{ChatRecord, NewChat, Page, PageRequest};

/// Persistent chat storage.
#[async_trait]
pub trait ChatStore: Send + Sync + std::fmt::Debug + 'static {
    /// Store a chat.
    async fn create(&self, chat: NewChat) -> AppResult<ChatRecord>;

    /// Look up a chat by ID.
    async fn find(&self, id: Uuid) -> AppResult<Option<ChatRecord>>;

    /// Chats sent or received by `user`, newest first.
    async fn list_for(&self, user: Uuid, page: &PageRequest) -> AppResult<Page<ChatRecord>>;

    /// Delete a chat. Responses to it keep existing with `respond_to` cleared.
    ///
    /// Returns `false` if no such chat exists.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Forget a deleted user: chats they sent are deleted, chats they received
    /// lose their receiver.
    async fn purge_user(&self, user: Uuid) -> AppResult<()>;
}
