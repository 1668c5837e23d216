//! Auth handlers: sign-up, PIN reissue, confirmation, token, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use socialhub_core::error::AppError;
use socialhub_service::SignUp;

use crate::dto::request::{
    ConfirmRequest, LoginRequest, RefreshRequest, ResendPinRequest, SignUpRequest,
};
use crate::dto::response::{SignUpResponse, TokenResponse};
use crate::extractors::{AuthUser, UuidPath, ValidatedJson};
use crate::state::AppState;

/// POST /v1/auth/sign_up
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    let outcome = state
        .account_service
        .sign_up(SignUp {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user: outcome.user.into(),
            confirmation_pin: outcome.confirmation_pin,
        }),
    ))
}

/// POST /v1/auth/resend_pin
pub async fn resend_pin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ResendPinRequest>,
) -> Result<Json<SignUpResponse>, AppError> {
    let outcome = state
        .account_service
        .resend_pin(&req.email, &req.password)
        .await?;

    Ok(Json(SignUpResponse {
        user: outcome.user.into(),
        confirmation_pin: outcome.confirmation_pin,
    }))
}

/// POST /v1/auth/confirm/{user_id}
pub async fn confirm(
    State(state): State<AppState>,
    UuidPath(user_id): UuidPath,
    ValidatedJson(req): ValidatedJson<ConfirmRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let (_, tokens) = state.account_service.confirm(user_id, &req.pin).await?;

    Ok(Json(TokenResponse {
        access: tokens.access,
        refresh: Some(tokens.refresh),
    }))
}

/// POST /v1/auth/token
pub async fn token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let (_, tokens) = state
        .account_service
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(TokenResponse {
        access: tokens.access,
        refresh: Some(tokens.refresh),
    }))
}

/// POST /v1/auth/token/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let access = state.account_service.refresh(&req.refresh).await?;

    Ok(Json(TokenResponse {
        access,
        refresh: None,
    }))
}

/// POST /v1/auth/logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<StatusCode, AppError> {
    state.account_service.logout(&auth.claims).await?;
    Ok(StatusCode::NO_CONTENT)
}
