//! HTTP listener and browser-access configuration.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Where the API listens and who may call it from a browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to listen on.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Cross-origin access for web clients reporting UI focus.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parsed listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("server.host '{}' is not a valid IP address", self.host),
                e,
            )
        })
    }
}

/// Origins allowed to call the API from a browser.
///
/// Methods and headers are fixed by the API surface: `GET`, `POST`,
/// `DELETE` and `OPTIONS` with `Authorization` and `Content-Type`; the
/// pagination headers are exposed to scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `"*"` allows any.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// Preflight cache lifetime in seconds.
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            max_age_seconds: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Whether any origin is accepted.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_age() -> u64 {
    600
}
