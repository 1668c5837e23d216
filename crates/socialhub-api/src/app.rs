//! Application builder: wires configuration, store, auth, presence and
//! services into an Axum app.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use socialhub_auth::{
    Authenticator, ConfirmationPins, InMemoryUserDirectory, JwtDecoder, JwtEncoder,
    PasswordHasher, PasswordValidator,
};
use socialhub_cache::StoreManager;
use socialhub_core::config::AppConfig;
use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;
use socialhub_core::traits::{ChatStore, KeyValueStore, UserDirectory};
use socialhub_presence::PresenceEngine;
use socialhub_service::{AccountService, ChatService, InMemoryChatStore, UserService};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

impl AppState {
    /// Wires every component on top of an existing store, user directory and
    /// chat store.
    pub fn assemble(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        directory: Arc<dyn UserDirectory>,
        chats: Arc<dyn ChatStore>,
    ) -> AppResult<Self> {
        let presence = PresenceEngine::from_config(Arc::clone(&store), &config.presence)?;
        let store_timeout = config.presence.store_timeout();

        let jwt_encoder = JwtEncoder::new(&config.auth);
        let jwt_decoder = JwtDecoder::new(&config.auth, Arc::clone(&store), store_timeout);
        let authenticator = Arc::new(Authenticator::new(
            jwt_decoder.clone(),
            Arc::clone(&directory),
            presence.clone(),
        ));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&directory),
            PasswordHasher::new(),
            PasswordValidator::new(&config.auth),
            ConfirmationPins::new(&config.auth, Arc::clone(&store), store_timeout),
            jwt_encoder,
            jwt_decoder,
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&directory),
            Arc::clone(&chats),
            presence.clone(),
        ));
        let chat_service = Arc::new(ChatService::new(chats, directory));

        Ok(Self {
            config: Arc::new(config),
            store,
            authenticator,
            presence,
            account_service,
            user_service,
            chat_service,
        })
    }

    /// Connects the configured store and wires the application.
    ///
    /// Users and chats live in process memory.
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        info!(provider = %config.cache.provider, "Initializing key-value store");
        let store: Arc<dyn KeyValueStore> = Arc::new(StoreManager::new(&config.cache).await?);
        let directory: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
        let chats: Arc<dyn ChatStore> = Arc::new(InMemoryChatStore::new());
        Self::assemble(config, store, directory, chats)
    }
}

/// Runs the SocialHub server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    info!("Starting SocialHub server...");

    let addr = config.server.socket_addr()?;
    let state = AppState::from_config(config).await?;
    info!(policy = %state.presence.active_kind(), "Presence policy active");

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "SocialHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("SocialHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
