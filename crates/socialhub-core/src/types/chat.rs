//! Direct messages between friends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a chat message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// A stored chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// The user who sent the chat.
    pub sender: Uuid,
    /// The recipient; `None` once the recipient's account is deleted.
    pub receiver: Option<Uuid>,
    /// The chat this one answers; `None` if it was deleted.
    pub respond_to: Option<Uuid>,
    /// Text body.
    pub message: Option<String>,
    /// Location URL.
    pub location: Option<String>,
    /// Send time.
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    /// Whether `user` sent or received this chat.
    pub fn involves(&self, user: Uuid) -> bool {
        self.sender == user || self.receiver == Some(user)
    }
}

/// Input for storing a chat.
#[derive(Debug, Clone)]
pub struct NewChat {
    /// Sender.
    pub sender: Uuid,
    /// Recipient.
    pub receiver: Uuid,
    /// Answered chat.
    pub respond_to: Option<Uuid>,
    /// Text body.
    pub message: Option<String>,
    /// Location URL.
    pub location: Option<String>,
}
