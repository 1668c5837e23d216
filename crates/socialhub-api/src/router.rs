//! Route definitions for the SocialHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/v1`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Largest accepted request body. Every endpoint takes a small JSON document.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(chat_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/v1", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration and token endpoints
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign_up", post(handlers::auth::sign_up))
        .route("/auth/resend_pin", post(handlers::auth::resend_pin))
        .route("/auth/confirm/{user_id}", post(handlers::auth::confirm))
        .route("/auth/token", post(handlers::auth::token))
        .route("/auth/token/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// Profile, friends, search, and presence endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route(
            "/users/{id}",
            get(handlers::user::get_user).delete(handlers::user::delete_user),
        )
        .route("/users/{id}/add_friends", post(handlers::user::add_friends))
        .route("/users/{id}/friends", get(handlers::user::list_friends))
        .route("/users/{id}/search", get(handlers::user::search_friends))
        .route(
            "/users/{id}/ui_online_status",
            post(handlers::presence::ui_online_status),
        )
}

/// Direct message endpoints
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chats",
            get(handlers::chat::list_chats).post(handlers::chat::create_chat),
        )
        .route("/chats/{id}", delete(handlers::chat::delete_chat))
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
