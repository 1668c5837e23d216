//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use socialhub_core::types::UserRecord;
use socialhub_service::{ChatView, FriendView, UserProfile};

/// Full user representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Whether the account is confirmed.
    pub is_active: bool,
    /// Confirmation time.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            confirmed_at: user.confirmed_at,
            created_at: user.created_at,
        }
    }
}

/// Minimal user representation used in friend lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefUserResponse {
    /// User ID.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl From<UserRecord> for BriefUserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Friend with online status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUserResponse {
    /// User ID.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Whether the user is online under the active policy.
    pub online: bool,
}

impl From<FriendView> for OnlineUserResponse {
    fn from(view: FriendView) -> Self {
        Self {
            id: view.user.id,
            first_name: view.user.first_name,
            last_name: view.user.last_name,
            online: view.online,
        }
    }
}

/// User profile with friends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// The user.
    #[serde(flatten)]
    pub user: UserResponse,
    /// The user's friends.
    pub friends: Vec<BriefUserResponse>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: profile.user.into(),
            friends: profile.friends.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sign-up response: the new user and the PIN to confirm it with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    /// The created user.
    #[serde(flatten)]
    pub user: UserResponse,
    /// Confirmation PIN.
    pub confirmation_pin: String,
}

/// A chat with participant names in place of their IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Chat ID.
    pub id: Uuid,
    /// Sender's full name.
    pub sender: Option<String>,
    /// Receiver's full name; null once the receiver deleted their account.
    pub receiver: Option<String>,
    /// ID of the chat this one answers.
    pub respond_to: Option<Uuid>,
    /// Text body.
    pub message: Option<String>,
    /// Location URL.
    pub location: Option<String>,
    /// Send time.
    pub created_at: DateTime<Utc>,
}

impl From<ChatView> for ChatResponse {
    fn from(view: ChatView) -> Self {
        Self {
            id: view.chat.id,
            sender: view.sender_name,
            receiver: view.receiver_name,
            respond_to: view.chat.respond_to,
            message: view.chat.message,
            location: view.chat.location,
            created_at: view.chat.created_at,
        }
    }
}

/// Access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access: String,
    /// Refresh token; absent on refresh responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Whether the key-value store answered.
    pub store: bool,
    /// Name of the active presence policy.
    pub presence_policy: String,
}
