//! Key builders for every entry SocialHub keeps in the store.
//!
//! The backend adds its own configured prefix on top of these.

use uuid::Uuid;

/// Hash holding the presence record of a user.
pub fn presence(user_id: Uuid) -> String {
    format!("presence:{user_id}")
}

/// Scalar holding the pending sign-up confirmation PIN of a user.
pub fn sign_up_confirmation_pin(user_id: Uuid) -> String {
    format!("sign_up_confirmation_pin:{user_id}")
}

/// Marker for a revoked access token.
pub fn jwt_blocklist(jti: Uuid) -> String {
    format!("jwt:blocked:{jti}")
}

/// Presence record field set on every successful authentication.
pub const FIELD_LOGGED_IN: &str = "logged_in";

/// Presence record field reflecting client UI focus.
pub const FIELD_UI_OPEN: &str = "ui_open";
