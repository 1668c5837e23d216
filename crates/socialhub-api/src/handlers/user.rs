//! User handlers: profiles, listing, search, deletion and friends.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use socialhub_core::error::AppError;

use crate::dto::request::{AddFriendsRequest, SearchQuery};
use crate::dto::response::{BriefUserResponse, OnlineUserResponse, ProfileResponse};
use crate::extractors::{AuthUser, Paginated, Pagination, UuidPath, ValidatedJson};
use crate::state::AppState;

/// GET /v1/users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    pagination: Pagination,
) -> Result<Paginated<BriefUserResponse>, AppError> {
    let users = state.user_service.list(&pagination.request).await?;
    Ok(pagination.respond(users.map(Into::into)))
}

/// GET /v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    UuidPath(user_id): UuidPath,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.user_service.profile(user_id).await?;
    Ok(Json(profile.into()))
}

/// DELETE /v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    UuidPath(user_id): UuidPath,
) -> Result<StatusCode, AppError> {
    state.user_service.destroy(auth.user.id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/users/{id}/add_friends
pub async fn add_friends(
    State(state): State<AppState>,
    auth: AuthUser,
    UuidPath(user_id): UuidPath,
    ValidatedJson(req): ValidatedJson<AddFriendsRequest>,
) -> Result<Json<Vec<BriefUserResponse>>, AppError> {
    let friends = state
        .user_service
        .add_friends(auth.user.id, user_id, &req.friends)
        .await?;
    Ok(Json(friends.into_iter().map(Into::into).collect()))
}

/// GET /v1/users/{id}/friends
pub async fn list_friends(
    State(state): State<AppState>,
    _auth: AuthUser,
    UuidPath(user_id): UuidPath,
    pagination: Pagination,
) -> Result<Paginated<OnlineUserResponse>, AppError> {
    let friends = state
        .user_service
        .friends(user_id, &pagination.request)
        .await?;
    Ok(pagination.respond(friends.map(Into::into)))
}

/// GET /v1/users/{id}/search?name=
pub async fn search_friends(
    State(state): State<AppState>,
    auth: AuthUser,
    UuidPath(user_id): UuidPath,
    pagination: Pagination,
    query: Result<Query<SearchQuery>, axum::extract::rejection::QueryRejection>,
) -> Result<Paginated<BriefUserResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let name = query
        .name
        .ok_or_else(|| AppError::validation("The name query parameter is required"))?;

    let found = state
        .user_service
        .search(auth.user.id, user_id, &name, &pagination.request)
        .await?;
    Ok(pagination.respond(found.map(Into::into)))
}
