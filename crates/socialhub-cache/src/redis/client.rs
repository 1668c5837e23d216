//! Redis connection handle shared by every request.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::{info, warn};

use socialhub_core::config::RedisStoreConfig;
use socialhub_core::error::{AppError, ErrorKind};
use socialhub_core::result::AppResult;

/// Process-wide Redis handle.
///
/// Cloning is cheap: the [`ConnectionManager`] multiplexes one reconnecting
/// connection across all clones.
#[derive(Debug, Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisClient {
    /// Open the connection described by `config` and verify it answers `PING`.
    pub async fn connect(config: &RedisStoreConfig) -> AppResult<Self> {
        let masked = mask_redis_url(&config.url);
        info!(url = %masked, prefix = %config.key_prefix, "Connecting to Redis");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid Redis URL", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            warn!(url = %masked, error = %e, "Redis connection failed");
            AppError::with_source(ErrorKind::Cache, "Failed to connect to Redis", e)
        })?;

        let this = Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        };
        this.ping().await?;

        info!(url = %masked, "Connected to Redis");
        Ok(this)
    }

    /// A handle for issuing commands.
    pub fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Namespace `key` with the configured prefix.
    pub fn key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }

    /// Round-trip a `PING`.
    pub async fn ping(&self) -> AppResult<bool> {
        let mut conn = self.conn();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Cache, "Redis PING failed", e))?;
        Ok(pong == "PONG")
    }
}

/// Mask the password in a Redis URL for logging.
fn mask_redis_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    match url[scheme_end..at_pos].find(':') {
        Some(colon) => format!(
            "{}:****@{}",
            &url[..scheme_end + colon],
            &url[at_pos + 1..]
        ),
        None => url.to_string(),
    }
}
