use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload carried by an access token.
///
/// `sub` names the account the token vouches for; `iat` and `exp` are Unix
/// timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `subject` issued at `now` and valid for `ttl`.
    ///
    /// A negative `ttl` produces claims that are already expired.
    pub fn new(subject: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = now + ttl;

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the claims are expired at `current_timestamp`.
    ///
    /// A token is only valid while `exp` is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
