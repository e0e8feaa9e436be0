//! Claims carried in a token payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open claims mapping. Keys keep insertion order, which is the order they
/// are signed in.
pub type Claims = Map<String, Value>;

/// Accessors for the registered claims used by authorization.
pub trait ClaimsExt {
    /// `iss`, if present and a string.
    fn issuer(&self) -> Option<&str>;
    /// `aud`, if present and a string.
    fn audience(&self) -> Option<&str>;
    /// `sub`, if present and a string.
    fn subject(&self) -> Option<&str>;
    /// `exp` in Unix seconds, if present and an integer.
    fn expiry(&self) -> Option<i64>;

    /// Whether `exp` lies strictly before `now`. Claims without `exp` are
    /// not considered expired here.
    fn is_expired_at(&self, now: i64) -> bool {
        self.expiry().is_some_and(|exp| now > exp)
    }
}

impl ClaimsExt for Claims {
    fn issuer(&self) -> Option<&str> {
        self.get("iss").and_then(Value::as_str)
    }

    fn audience(&self) -> Option<&str> {
        self.get("aud").and_then(Value::as_str)
    }

    fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    fn expiry(&self) -> Option<i64> {
        self.get("exp").and_then(Value::as_i64)
    }
}

/// Registered claims for issuing a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredClaims {
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RegisteredClaims {
    /// Create new claims valid for `expires_in_secs` from now.
    pub fn new(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        expires_in_secs: i64,
    ) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            iss: issuer.into(),
            aud: audience.into(),
            sub: subject.into(),
            iat: now,
            exp: now + expires_in_secs,
        }
    }
}
