//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use socialhub_core::config::AuthConfig;
use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access: String,
    /// Long-lived refresh token.
    pub refresh: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.jwt_access_ttl_minutes as i64),
            refresh_ttl: Duration::hours(config.jwt_refresh_ttl_hours as i64),
        }
    }

    /// Generates a new access + refresh token pair for the given user.
    pub fn generate_token_pair(&self, user_id: Uuid) -> AppResult<TokenPair> {
        let (access, access_claims) = self.issue(user_id, TokenType::Access, self.access_ttl)?;
        let (refresh, _) = self.issue(user_id, TokenType::Refresh, self.refresh_ttl)?;

        Ok(TokenPair {
            access,
            refresh,
            access_expires_at: DateTime::from_timestamp(access_claims.exp, 0)
                .unwrap_or_else(Utc::now),
        })
    }

    /// Generates a standalone access token, e.g. after a refresh.
    pub fn generate_access_token(&self, user_id: Uuid) -> AppResult<(String, Claims)> {
        self.issue(user_id, TokenType::Access, self.access_ttl)
    }

    /// Signs a single token of `token_type` valid for `lifetime` from now.
    pub fn issue(
        &self,
        user_id: Uuid,
        token_type: TokenType,
        lifetime: Duration,
    ) -> AppResult<(String, Claims)> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {token_type:?} token: {e}")))?;

        Ok((token, claims))
    }
}
