//! Read access to the lifetime of a verified credential.

use chrono::{DateTime, Utc};

/// A verified token whose absolute expiry is known.
///
/// The presence layer only ever reads the expiry; everything else about the
/// token belongs to the authentication layer.
pub trait TokenLifetime: Send + Sync {
    /// Absolute expiry time of the token.
    fn expires_at(&self) -> DateTime<Utc>;

    /// Whole seconds from `now` until expiry, floored. Negative once expired.
    fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        let remaining = self.expires_at() - now;
        let secs = remaining.num_seconds();
        // num_seconds truncates toward zero; floor for a partially elapsed negative second.
        if remaining.subsec_nanos() < 0 { secs - 1 } else { secs }
    }
}
