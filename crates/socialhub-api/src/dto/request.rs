//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Login email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// Given name.
    #[validate(length(min = 1, max = 150, message = "First name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 150, message = "Last name is required"))]
    pub last_name: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// PIN confirmation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmRequest {
    /// The PIN issued at sign-up.
    #[validate(length(min = 1, max = 10, message = "PIN is required"))]
    pub pin: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// PIN reissue request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendPinRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh: String,
}

/// Add-friends request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddFriendsRequest {
    /// IDs of the users to befriend.
    #[validate(length(min = 1, message = "At least one friend is required"))]
    pub friends: Vec<Uuid>,
}

/// UI focus report body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UiOnlineStatusRequest {
    /// Whether the application UI is open and in focus.
    pub ui_open: bool,
}

/// Friend search query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Part of a first or last name.
    pub name: Option<String>,
}

/// New chat request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateChatRequest {
    /// Recipient; must be a friend.
    pub receiver: Uuid,
    /// Chat being answered.
    #[serde(default)]
    pub respond_to: Option<Uuid>,
    /// Text body.
    #[serde(default)]
    #[validate(length(max = 500, message = "Message cannot exceed 500 characters"))]
    pub message: Option<String>,
    /// Location URL.
    #[serde(default)]
    #[validate(url(message = "Location must be a URL"))]
    pub location: Option<String>,
}
