//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use socialhub_auth::Authenticator;
use socialhub_core::config::AppConfig;
use socialhub_core::traits::KeyValueStore;
use socialhub_presence::PresenceEngine;
use socialhub_service::{AccountService, ChatService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap clones.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Expiring key-value store (Redis or in-memory)
    pub store: Arc<dyn KeyValueStore>,

    // ── Auth & presence ──────────────────────────────────────
    /// Bearer token authentication with presence refresh
    pub authenticator: Arc<Authenticator>,
    /// Presence engine with the live policy selector
    pub presence: PresenceEngine,

    // ── Services ─────────────────────────────────────────────
    /// Sign-up, confirmation, login, logout
    pub account_service: Arc<AccountService>,
    /// Profiles, friends, search, UI status
    pub user_service: Arc<UserService>,
    /// Direct messages
    pub chat_service: Arc<ChatService>,
}
