//! Presence handlers.

use axum::extract::State;
use axum::http::StatusCode;

use socialhub_core::error::AppError;

use crate::dto::request::UiOnlineStatusRequest;
use crate::extractors::{UuidPath, ValidatedJson, VerifiedUser};
use crate::state::AppState;

/// POST /v1/users/{id}/ui_online_status
///
/// Only allowed under the `UIOpenIsOnline` policy. The policy is checked
/// before the body is looked at, and a refused request leaves presence
/// untouched.
pub async fn ui_online_status(
    State(state): State<AppState>,
    auth: VerifiedUser,
    UuidPath(user_id): UuidPath,
    payload: Result<ValidatedJson<UiOnlineStatusRequest>, AppError>,
) -> Result<StatusCode, AppError> {
    state
        .user_service
        .ensure_ui_status_allowed(auth.user.id, user_id)?;
    let ValidatedJson(req) = payload?;

    state
        .user_service
        .set_ui_status(auth.user.id, user_id, &auth.claims, req.ui_open)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
