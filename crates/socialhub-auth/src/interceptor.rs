//! Bearer-token authentication with a presence side effect.

use std::sync::Arc;

use tracing::{debug, warn};

use socialhub_core::error::{AppError, CODE_UNCONFIRMED_USER};
use socialhub_core::result::AppResult;
use socialhub_core::traits::UserDirectory;
use socialhub_core::types::UserRecord;
use socialhub_presence::PresenceEngine;

use crate::jwt::{Claims, JwtDecoder};

/// A request principal after successful token verification.
#[derive(Debug, Clone)]
pub struct Authenticated {
    /// The user the token was issued to.
    pub user: UserRecord,
    /// The validated token claims.
    pub claims: Claims,
}

/// Verifies bearer tokens and refreshes the caller's presence record.
///
/// Every successful authentication writes presence through the active policy
/// before returning. Presence is best-effort: a store failure or timeout is
/// logged and the caller is still authenticated. A failed verification has no
/// presence side effect.
#[derive(Debug, Clone)]
pub struct Authenticator {
    decoder: JwtDecoder,
    directory: Arc<dyn UserDirectory>,
    presence: PresenceEngine,
}

impl Authenticator {
    /// Create an authenticator.
    pub fn new(
        decoder: JwtDecoder,
        directory: Arc<dyn UserDirectory>,
        presence: PresenceEngine,
    ) -> Self {
        Self {
            decoder,
            directory,
            presence,
        }
    }

    /// Authenticate from the raw `Authorization` header value.
    ///
    /// Returns `Ok(None)` when no bearer credential is present, and an
    /// authentication error when one is present but invalid, expired,
    /// revoked, or issued to an unknown or unconfirmed user. On success the
    /// caller's presence record is refreshed.
    pub async fn authenticate(&self, authorization: Option<&str>) -> AppResult<Option<Authenticated>> {
        let Some(principal) = self.verify(authorization).await? else {
            return Ok(None);
        };

        let user_id = principal.user.id;
        match self.presence.refresh(user_id, &principal.claims).await {
            Ok(()) => debug!(%user_id, policy = %self.presence.active_kind(), "Presence refreshed"),
            Err(e) => warn!(%user_id, error = %e, "Presence refresh failed"),
        }

        Ok(Some(principal))
    }

    /// Same checks as [`authenticate`](Self::authenticate) without touching presence.
    ///
    /// Used by endpoints that write presence themselves.
    pub async fn verify(&self, authorization: Option<&str>) -> AppResult<Option<Authenticated>> {
        let Some(token) = authorization.and_then(bearer_token) else {
            return Ok(None);
        };
        if token.is_empty() {
            return Err(AppError::authentication("Empty bearer token"));
        }

        let claims = self.decoder.decode_access_token(token).await?;
        let user = self
            .directory
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;
        if !user.is_active {
            return Err(AppError::authentication("User unconfirmed").with_code(CODE_UNCONFIRMED_USER));
        }

        Ok(Some(Authenticated { user, claims }))
    }

    /// The token decoder, for revocation.
    pub fn decoder(&self) -> &JwtDecoder {
        &self.decoder
    }

    /// The presence engine shared with the rest of the application.
    pub fn presence(&self) -> &PresenceEngine {
        &self.presence
    }
}

/// Token part of a `Bearer <token>` header value, scheme matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
}
