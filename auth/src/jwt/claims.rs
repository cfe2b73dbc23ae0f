use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// The payload is the subject only; everything else about the caller is
/// resolved from storage when the token is presented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (account identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for `subject` that expire `lifetime` from now.
    pub fn for_subject(subject: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiry(now, lifetime),
        }
    }
}

/// Claims carried by a refresh token.
///
/// `token` is the raw one-time secret. Only its hash is ever stored, so a
/// valid signature alone is not enough to refresh a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    /// Subject (account identifier)
    pub sub: String,

    /// Raw refresh secret
    pub token: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RefreshClaims {
    /// Create claims for `subject` embedding `raw_secret`, expiring `lifetime` from now.
    pub fn for_subject(subject: impl ToString, raw_secret: String, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            token: raw_secret,
            iat: now.timestamp(),
            exp: expiry(now, lifetime),
        }
    }
}

/// Saturates instead of overflowing past the last representable instant.
fn expiry(now: DateTime<Utc>, lifetime: Duration) -> i64 {
    now.checked_add_signed(lifetime)
        .map_or(i64::MAX, |at| at.timestamp())
}
