//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Clock skew tolerated when validating `exp`, in seconds.
    #[serde(default)]
    pub jwt_leeway_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Lifetime of a sign-up confirmation PIN in seconds.
    #[serde(default = "default_pin_ttl")]
    pub pin_ttl_seconds: u64,
    /// Number of digits in a confirmation PIN.
    #[serde(default = "default_pin_length")]
    pub pin_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_hours: default_refresh_ttl(),
            jwt_leeway_seconds: 0,
            password_min_length: default_password_min(),
            pin_ttl_seconds: default_pin_ttl(),
            pin_length: default_pin_length(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    1440
}

fn default_refresh_ttl() -> u64 {
    168
}

fn default_password_min() -> usize {
    8
}

fn default_pin_ttl() -> u64 {
    3600
}

fn default_pin_length() -> usize {
    4
}
