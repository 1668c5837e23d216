//! Names of the available online presence policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identifies which presence policy decides whether a user is online.
///
/// Parsed from the `presence.policy` configuration value. The string forms
/// are the names operators put in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    /// A user is online while their last access token is still valid.
    #[serde(rename = "LoggedInIsOnline")]
    LoggedInIsOnline,
    /// A user is online while logged in and their client UI is open.
    #[serde(rename = "UIOpenIsOnline")]
    UiOpenIsOnline,
}

impl PolicyKind {
    /// Every known policy, in registration order.
    pub const ALL: [PolicyKind; 2] = [PolicyKind::LoggedInIsOnline, PolicyKind::UiOpenIsOnline];

    /// The configuration name of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoggedInIsOnline => "LoggedInIsOnline",
            Self::UiOpenIsOnline => "UIOpenIsOnline",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Unknown online status policy: '{s}'. Supported: LoggedInIsOnline, UIOpenIsOnline"
                ))
            })
    }
}
