//! Chat handlers: send, list and delete direct messages.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use socialhub_core::error::AppError;
use socialhub_service::ChatDraft;

use crate::dto::request::CreateChatRequest;
use crate::dto::response::ChatResponse;
use crate::extractors::{AuthUser, Paginated, Pagination, UuidPath, ValidatedJson};
use crate::state::AppState;

/// POST /v1/chats
pub async fn create_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateChatRequest>,
) -> Result<(StatusCode, Json<ChatResponse>), AppError> {
    let chat = state
        .chat_service
        .create(
            auth.user.id,
            ChatDraft {
                receiver: req.receiver,
                respond_to: req.respond_to,
                message: req.message,
                location: req.location,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(chat.into())))
}

/// GET /v1/chats
pub async fn list_chats(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> Result<Paginated<ChatResponse>, AppError> {
    let chats = state
        .chat_service
        .list(auth.user.id, &pagination.request)
        .await?;
    Ok(pagination.respond(chats.map(Into::into)))
}

/// DELETE /v1/chats/{id}
pub async fn delete_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    UuidPath(chat_id): UuidPath,
) -> Result<StatusCode, AppError> {
    state.chat_service.destroy(auth.user.id, chat_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
