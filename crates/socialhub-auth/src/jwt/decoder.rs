//! JWT token validation and blocklist checking.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::{debug, warn};

use socialhub_cache::{BoundedStore, keys};
use socialhub_core::config::AuthConfig;
use socialhub_core::error::{AppError, ErrorKind};
use socialhub_core::result::AppResult;
use socialhub_core::traits::{KeyValueStore, TokenLifetime};

use super::claims::{Claims, TokenType};

/// Validates JWT tokens and checks blocklist status.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Store holding revoked token IDs, bounded by the store timeout.
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    ///
    /// Blocklist reads and writes give up after `store_timeout`.
    pub fn new(config: &AuthConfig, store: Arc<dyn KeyValueStore>, store_timeout: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.jwt_leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            store: Arc::new(BoundedStore::new(store, store_timeout)),
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks the signature, the expiry, that the token is an access token,
    /// and that its ID has not been revoked.
    pub async fn decode_access_token(&self, token: &str) -> AppResult<Claims> {
        self.decode_typed(token, TokenType::Access).await
    }

    /// Decodes and validates a refresh token string.
    pub async fn decode_refresh_token(&self, token: &str) -> AppResult<Claims> {
        self.decode_typed(token, TokenType::Refresh).await
    }

    async fn decode_typed(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        let claims = self.decode_token(token)?;

        if claims.token_type != expected {
            return Err(AppError::authentication(format!(
                "Invalid token type: expected {expected:?} token"
            )));
        }

        self.check_blocklist(&claims).await?;

        Ok(claims)
    }

    fn decode_token(&self, token: &str) -> AppResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Rejects a revoked token. An unreachable or stalled store lets the
    /// token through.
    async fn check_blocklist(&self, claims: &Claims) -> AppResult<()> {
        let key = keys::jwt_blocklist(claims.jti);
        match self.store.get(&key).await {
            Ok(Some(_)) => Err(AppError::authentication("Token has been revoked")),
            Ok(None) => Ok(()),
            Err(e) => {
                warn!(jti = %claims.jti, error = %e, "Blocklist lookup failed");
                Ok(())
            }
        }
    }

    /// Revokes the token described by `claims` for the rest of its lifetime.
    pub async fn blocklist_token(&self, claims: &Claims) -> AppResult<()> {
        let remaining = claims.remaining_seconds(Utc::now());
        if remaining <= 0 {
            debug!(jti = %claims.jti, "Token already expired, nothing to revoke");
            return Ok(());
        }

        self.store
            .set(
                &keys::jwt_blocklist(claims.jti),
                "revoked",
                Duration::from_secs(remaining as u64),
            )
            .await
            .map_err(|e| match e.kind {
                ErrorKind::ServiceUnavailable => e,
                _ => AppError::internal(format!("Failed to blocklist token: {e}")),
            })
    }
}
