//! In-process [`ChatStore`] for development and tests.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use socialhub_core::result::AppResult;
use socialhub_core::traits::ChatStore;
use socialhub_core::types::{ChatRecord, NewChat, Page, PageRequest};

/// Chat storage kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryChatStore {
    chats: DashMap<Uuid, ChatRecord>,
}

impl InMemoryChatStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn detach_responses(&self, removed: &[Uuid]) {
        for mut chat in self.chats.iter_mut() {
            if chat.respond_to.is_some_and(|r| removed.contains(&r)) {
                chat.respond_to = None;
            }
        }
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn create(&self, chat: NewChat) -> AppResult<ChatRecord> {
        let record = ChatRecord {
            id: Uuid::new_v4(),
            sender: chat.sender,
            receiver: Some(chat.receiver),
            respond_to: chat.respond_to,
            message: chat.message,
            location: chat.location,
            created_at: Utc::now(),
        };
        self.chats.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<ChatRecord>> {
        Ok(self.chats.get(&id).map(|c| c.clone()))
    }

    async fn list_for(&self, user: Uuid, page: &PageRequest) -> AppResult<Page<ChatRecord>> {
        let mut chats: Vec<ChatRecord> = self
            .chats
            .iter()
            .filter(|c| c.involves(user))
            .map(|c| c.value().clone())
            .collect();
        chats.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(page.slice(chats))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        if self.chats.remove(&id).is_none() {
            return Ok(false);
        }
        self.detach_responses(&[id]);
        Ok(true)
    }

    async fn purge_user(&self, user: Uuid) -> AppResult<()> {
        let sent: Vec<Uuid> = self
            .chats
            .iter()
            .filter(|c| c.sender == user)
            .map(|c| c.id)
            .collect();
        for id in &sent {
            self.chats.remove(id);
        }
        self.detach_responses(&sent);

        for mut chat in self.chats.iter_mut() {
            if chat.receiver == Some(user) {
                chat.receiver = None;
            }
        }

        debug!(user_id = %user, deleted = sent.len(), "Chats purged for deleted user");
        Ok(())
    }
}
