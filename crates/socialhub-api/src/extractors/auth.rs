//! Bearer-token extractors backed by the [`Authenticator`](socialhub_auth::Authenticator).

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use socialhub_auth::Authenticated;
use socialhub_core::error::AppError;

use crate::state::AppState;

/// Authenticated caller. Extracting it refreshes the caller's presence.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Authenticated);

/// Authenticated caller, verified without writing presence.
///
/// For endpoints that write presence themselves or must leave it untouched
/// when they refuse the request.
#[derive(Debug, Clone)]
pub struct VerifiedUser(pub Authenticated);

impl std::ops::Deref for AuthUser {
    type Target = Authenticated;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for VerifiedUser {
    type Target = Authenticated;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn authorization_header(parts: &Parts) -> Result<Option<&str>, AppError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .map(|v| {
            v.to_str()
                .map_err(|_| AppError::authentication("Malformed Authorization header"))
        })
        .transpose()
}

fn missing_credentials() -> AppError {
    AppError::authentication("Authentication credentials were not provided")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts)?;
        state
            .authenticator
            .authenticate(header)
            .await?
            .map(AuthUser)
            .ok_or_else(missing_credentials)
    }
}

impl FromRequestParts<AppState> for VerifiedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts)?;
        state
            .authenticator
            .verify(header)
            .await?
            .map(VerifiedUser)
            .ok_or_else(missing_credentials)
    }
}
