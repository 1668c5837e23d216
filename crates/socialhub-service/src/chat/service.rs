//! Chat service: direct messages between friends.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;
use socialhub_core::traits::{ChatStore, UserDirectory};
use socialhub_core::types::chat::MAX_MESSAGE_CHARS;
use socialhub_core::types::{ChatRecord, NewChat, Page, PageRequest};

/// What a caller wants to send.
#[derive(Debug, Clone, Default)]
pub struct ChatDraft {
    /// Recipient; must be a friend of the sender.
    pub receiver: Uuid,
    /// Chat being answered; must be visible to the sender.
    pub respond_to: Option<Uuid>,
    /// Text body.
    pub message: Option<String>,
    /// Location URL.
    pub location: Option<String>,
}

/// A chat with its participants' display names.
#[derive(Debug, Clone)]
pub struct ChatView {
    /// The chat.
    pub chat: ChatRecord,
    /// Sender's full name.
    pub sender_name: Option<String>,
    /// Receiver's full name, if the receiver still exists.
    pub receiver_name: Option<String>,
}

/// Handles chat creation, listing and deletion.
#[derive(Debug, Clone)]
pub struct ChatService {
    chats: Arc<dyn ChatStore>,
    directory: Arc<dyn UserDirectory>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(chats: Arc<dyn ChatStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { chats, directory }
    }

    /// Sends a chat from `caller`.
    pub async fn create(&self, caller: Uuid, draft: ChatDraft) -> AppResult<ChatView> {
        let message = draft.message.filter(|m| !m.trim().is_empty());
        let location = draft.location.filter(|l| !l.trim().is_empty());
        if message.is_none() && location.is_none() {
            return Err(AppError::validation("A message or location is required"));
        }
        if message
            .as_ref()
            .is_some_and(|m| m.chars().count() > MAX_MESSAGE_CHARS)
        {
            return Err(AppError::validation(format!(
                "Message cannot exceed {MAX_MESSAGE_CHARS} characters"
            )));
        }

        if self.directory.find_by_id(draft.receiver).await?.is_none() {
            return Err(AppError::validation(format!("Unknown user {}", draft.receiver)));
        }
        let friends = self.directory.friends_of(caller).await?;
        if !friends.iter().any(|f| f.id == draft.receiver) {
            return Err(AppError::validation(
                "Only friends can send chat messages to each other",
            ));
        }

        if let Some(respond_to) = draft.respond_to {
            let visible = self
                .chats
                .find(respond_to)
                .await?
                .is_some_and(|c| c.involves(caller));
            if !visible {
                return Err(AppError::validation(format!("Unknown chat {respond_to}")));
            }
        }

        let chat = self
            .chats
            .create(NewChat {
                sender: caller,
                receiver: draft.receiver,
                respond_to: draft.respond_to,
                message,
                location,
            })
            .await?;
        info!(chat_id = %chat.id, sender = %caller, receiver = %draft.receiver, "Chat sent");

        let mut names = HashMap::new();
        self.view(chat, &mut names).await
    }

    /// Chats the caller sent or received, newest first.
    pub async fn list(&self, caller: Uuid, page: &PageRequest) -> AppResult<Page<ChatView>> {
        let chats = self.chats.list_for(caller, page).await?;
        let mut names = HashMap::new();
        let mut views = Vec::with_capacity(chats.items.len());
        for chat in &chats.items {
            views.push(self.view(chat.clone(), &mut names).await?);
        }
        Ok(Page::new(views, *page, chats.total))
    }

    /// Deletes a chat the caller sent or received.
    ///
    /// Chats of other users are reported as missing.
    pub async fn destroy(&self, caller: Uuid, chat_id: Uuid) -> AppResult<()> {
        let missing = || AppError::not_found(format!("Chat {chat_id} not found"));
        let chat = self.chats.find(chat_id).await?.ok_or_else(missing)?;
        if !chat.involves(caller) {
            return Err(missing());
        }
        if !self.chats.delete(chat_id).await? {
            return Err(missing());
        }
        info!(%chat_id, user_id = %caller, "Chat deleted");
        Ok(())
    }

    async fn view(
        &self,
        chat: ChatRecord,
        names: &mut HashMap<Uuid, Option<String>>,
    ) -> AppResult<ChatView> {
        let sender_name = self.full_name(chat.sender, names).await?;
        let receiver_name = match chat.receiver {
            Some(receiver) => self.full_name(receiver, names).await?,
            None => None,
        };
        Ok(ChatView {
            chat,
            sender_name,
            receiver_name,
        })
    }

    async fn full_name(
        &self,
        id: Uuid,
        names: &mut HashMap<Uuid, Option<String>>,
    ) -> AppResult<Option<String>> {
        if let Some(name) = names.get(&id) {
            return Ok(name.clone());
        }
        let name = self
            .directory
            .find_by_id(id)
            .await?
            .map(|u| format!("{} {}", u.first_name, u.last_name));
        names.insert(id, name.clone());
        Ok(name)
    }
}
