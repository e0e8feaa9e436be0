//! End-to-end authorization of an `Authorization` header value.

use std::fmt;

use jwt_error::AuthError;
use serde_json::Value;

use crate::claims::{Claims, ClaimsExt};
use crate::digest::{HmacSha256, KeyedDigest};
use crate::header::BEARER_SCHEME;
use crate::jwt::{extract_claims, verify_token_with};
use crate::shape::{looks_like_token_with, ClaimPolicy};

/// Authorization configuration.
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret key for verifying tokens
    pub key: String,
    /// Expected issuer
    pub iss: String,
    /// Expected audience
    pub aud: String,
    /// Claims a payload must mention to be considered at all
    pub claim_policy: ClaimPolicy,
}

impl AuthConfig {
    /// Create a new configuration requiring `iss` and `aud` in the payload.
    pub fn new(key: impl Into<String>, iss: impl Into<String>, aud: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            iss: iss.into(),
            aud: aud.into(),
            claim_policy: ClaimPolicy::issuer_and_audience(),
        }
    }

    /// Set the claims shape detection requires.
    pub fn with_claim_policy(mut self, policy: ClaimPolicy) -> Self {
        self.claim_policy = policy;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// `JWT_KEY`, `JWT_ISS` and `JWT_AUD` are required. `JWT_REQUIRED_CLAIMS`
    /// optionally overrides the claim policy with a comma-separated list.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("JWT_KEY").ok().filter(|k| !k.is_empty())?;
        let iss = std::env::var("JWT_ISS").ok()?;
        let aud = std::env::var("JWT_AUD").ok()?;

        let mut config = Self::new(key, iss, aud);
        if let Ok(claims) = std::env::var("JWT_REQUIRED_CLAIMS") {
            config.claim_policy = ClaimPolicy::parse(&claims);
        }

        Some(config)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("key", &"[REDACTED]")
            .field("iss", &self.iss)
            .field("aud", &self.aud)
            .field("claim_policy", &self.claim_policy)
            .finish()
    }
}

/// Authorize an `Authorization` header value.
///
/// Returns `Ok(None)` when no token of ours is present, which callers
/// usually treat as an anonymous request.
pub fn authorize(
    authorization: Option<&str>,
    config: &AuthConfig,
) -> Result<Option<Claims>, AuthError> {
    authorize_with(&HmacSha256, authorization, config)
}

/// [`authorize`] with the given digest.
pub fn authorize_with<D>(
    digest: &D,
    authorization: Option<&str>,
    config: &AuthConfig,
) -> Result<Option<Claims>, AuthError>
where
    D: KeyedDigest + ?Sized,
{
    authorize_at(digest, authorization, config, chrono::Utc::now().timestamp())
}

/// [`authorize_with`] evaluated at Unix time `now`.
pub fn authorize_at<D>(
    digest: &D,
    authorization: Option<&str>,
    config: &AuthConfig,
    now: i64,
) -> Result<Option<Claims>, AuthError>
where
    D: KeyedDigest + ?Sized,
{
    if !looks_like_token_with(authorization, &config.claim_policy) {
        return Ok(None);
    }
    let Some(token) = authorization.and_then(|value| value.strip_prefix(BEARER_SCHEME)) else {
        return Ok(None);
    };

    if !verify_token_with(digest, token, &config.key)? {
        tracing::warn!("Rejected token with invalid signature");
        return Err(AuthError::InvalidSignature);
    }

    let claims = match extract_claims(token) {
        Ok(Some(Value::Object(claims))) => claims,
        Ok(Some(_)) => return Err(AuthError::Malformed("payload is not an object".into())),
        Ok(None) => return Err(AuthError::Malformed("missing payload segment".into())),
        Err(e) => return Err(AuthError::Malformed(e.to_string())),
    };

    let Some(exp) = claims.expiry() else {
        tracing::warn!("Rejected token without an integer exp claim");
        return Err(AuthError::Malformed("missing exp claim".into()));
    };
    if claims.is_expired_at(now) {
        tracing::warn!("Rejected token expired at {}", exp);
        return Err(AuthError::Expired);
    }

    if claims.issuer() != Some(config.iss.as_str()) || claims.audience() != Some(config.aud.as_str())
    {
        tracing::warn!(
            "Rejected token for issuer {:?} and audience {:?}",
            claims.issuer(),
            claims.audience()
        );
        return Err(AuthError::WrongIssuerOrAudience);
    }

    Ok(Some(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::create_token;
    use jwt_error::DigestError;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;

    fn config() -> AuthConfig {
        AuthConfig::new("k", "A", "B")
    }

    fn bearer(payload: Value) -> String {
        format!("Bearer {}", create_token(&payload, "k").unwrap())
    }

    fn run(authorization: Option<&str>, config: &AuthConfig) -> Result<Option<Claims>, AuthError> {
        authorize_at(&HmacSha256, authorization, config, NOW)
    }

    #[test]
    fn test_exp_boundary() {
        let auth = bearer(json!({"iss": "A", "aud": "B", "exp": NOW}));
        assert!(run(Some(&auth), &config()).unwrap().is_some());

        let auth = bearer(json!({"iss": "A", "aud": "B", "exp": NOW - 1}));
        assert!(matches!(run(Some(&auth), &config()), Err(AuthError::Expired)));
    }

    #[test]
    fn test_missing_exp_is_malformed() {
        let auth = bearer(json!({"iss": "A", "aud": "B"}));
        assert!(matches!(
            run(Some(&auth), &config()),
            Err(AuthError::Malformed(_))
        ));

        let auth = bearer(json!({"iss": "A", "aud": "B", "exp": "soon"}));
        assert!(matches!(
            run(Some(&auth), &config()),
            Err(AuthError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_integer_exp_is_malformed() {
        let auth = bearer(json!({"iss": "A", "aud": "B", "exp": 4102444800.0}));
        assert!(matches!(
            run(Some(&auth), &config()),
            Err(AuthError::Malformed(_))
        ));

        let auth = bearer(json!({"iss": "A", "aud": "B", "exp": u64::MAX}));
        assert!(matches!(
            run(Some(&auth), &config()),
            Err(AuthError::Malformed(_))
        ));
    }

    #[test]
    fn test_wrong_audience() {
        let auth = bearer(json!({"iss": "A", "aud": "b", "exp": NOW + 60}));
        assert!(matches!(
            run(Some(&auth), &config()),
            Err(AuthError::WrongIssuerOrAudience)
        ));
    }

    #[test]
    fn test_expiry_checked_before_issuer() {
        let auth = bearer(json!({"iss": "X", "aud": "Y", "exp": NOW - 60}));
        assert!(matches!(run(Some(&auth), &config()), Err(AuthError::Expired)));
    }

    #[test]
    fn test_claim_policy_gates_detection() {
        let auth = bearer(json!({"sub": "x", "exp": NOW + 60}));
        assert!(run(Some(&auth), &config()).unwrap().is_none());

        let permissive = config().with_claim_policy(ClaimPolicy::none());
        assert!(matches!(
            run(Some(&auth), &permissive),
            Err(AuthError::WrongIssuerOrAudience)
        ));
    }

    #[test]
    fn test_wrong_key_is_invalid_signature() {
        let auth = bearer(json!({"iss": "A", "aud": "B", "exp": NOW + 60}));
        let other = AuthConfig::new("other", "A", "B");
        assert!(matches!(
            run(Some(&auth), &other),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_digest_failure_propagates() {
        struct Broken;
        impl KeyedDigest for Broken {
            fn digest(&self, _message: &str, _key: &str) -> Result<String, DigestError> {
                Err(DigestError::InvalidKey("offline".into()))
            }
        }

        let auth = bearer(json!({"iss": "A", "aud": "B", "exp": NOW + 60}));
        let result = authorize_at(&Broken, Some(&auth), &config(), NOW);
        assert!(matches!(result, Err(AuthError::Upstream(_))));
    }

    #[test]
    fn test_config_from_env() {
        // Env vars are process-wide, so every case lives in this one test.
        for var in ["JWT_KEY", "JWT_ISS", "JWT_AUD", "JWT_REQUIRED_CLAIMS"] {
            std::env::remove_var(var);
        }
        assert!(AuthConfig::from_env().is_none());

        std::env::set_var("JWT_KEY", "");
        std::env::set_var("JWT_ISS", "A");
        std::env::set_var("JWT_AUD", "B");
        assert!(AuthConfig::from_env().is_none());

        std::env::set_var("JWT_KEY", "k");
        std::env::remove_var("JWT_AUD");
        assert!(AuthConfig::from_env().is_none());

        std::env::set_var("JWT_AUD", "B");
        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.key, "k");
        assert_eq!(config.iss, "A");
        assert_eq!(config.aud, "B");
        assert_eq!(config.claim_policy, ClaimPolicy::issuer_and_audience());

        std::env::set_var("JWT_REQUIRED_CLAIMS", "sub, exp");
        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.claim_policy, ClaimPolicy::new(["sub", "exp"]));

        for var in ["JWT_KEY", "JWT_ISS", "JWT_AUD", "JWT_REQUIRED_CLAIMS"] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", AuthConfig::new("top-secret", "A", "B"));
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
