//! Tracing output configuration.

use serde::{Deserialize, Serialize};

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// Tracing filter and output settings.
///
/// `RUST_LOG`, when set, replaces the filter built here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base `EnvFilter` directive, e.g. `"info"` or `"debug,tower_http=info"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Level for the presence crate alone. Presence writes log at `debug`.
    #[serde(default)]
    pub presence_level: Option<String>,
    /// Output encoding.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            presence_level: None,
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Full filter directive string.
    pub fn filter_directives(&self) -> String {
        match &self.presence_level {
            Some(level) => format!("{},socialhub_presence={level}", self.level),
            None => self.level.clone(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
