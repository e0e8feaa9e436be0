//! Cheap detection of authorization values that carry one of our tokens.
//!
//! This runs before any signature check. It never touches the key: it only
//! rejects values that cannot possibly validate.

use crate::base64url;
use crate::header::bearer_prefix;

/// Claim names that must appear in a payload for it to pass shape detection.
///
/// The check is a substring test on the decoded payload text, not a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimPolicy {
    required: Vec<String>,
}

impl ClaimPolicy {
    /// Require each of `names` to appear in the payload.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Accept any JSON-object payload.
    pub fn none() -> Self {
        Self::default()
    }

    /// Require `iss` and `aud`.
    pub fn issuer_and_audience() -> Self {
        Self::new(["iss", "aud"])
    }

    /// Parse a comma-separated list of claim names. Blank entries are skipped.
    pub fn parse(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    /// Required claim names, in the order given.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Whether `payload` mentions every required claim name.
    pub fn matches(&self, payload: &str) -> bool {
        self.required.iter().all(|name| payload.contains(name.as_str()))
    }
}

/// Whether `authorization` plausibly carries a token of ours.
pub fn looks_like_token(authorization: Option<&str>) -> bool {
    looks_like_token_with(authorization, &ClaimPolicy::none())
}

/// Whether `authorization` plausibly carries a token of ours whose payload
/// satisfies `policy`.
pub fn looks_like_token_with(authorization: Option<&str>, policy: &ClaimPolicy) -> bool {
    let Some(authorization) = authorization.filter(|value| !value.is_empty()) else {
        return false;
    };

    // Pins both the scheme and the header segment.
    let Some(rest) = authorization.strip_prefix(bearer_prefix()) else {
        tracing::debug!("Authorization value is not a bearer token of ours");
        return false;
    };

    let Some((payload_segment, _signature)) = rest.split_once('.') else {
        return false;
    };

    let payload = base64url::decode(payload_segment);
    if payload.is_empty() {
        return false;
    }
    if !(payload.starts_with('{') && payload.ends_with('}')) {
        return false;
    }

    if !policy.matches(&payload) {
        tracing::debug!("Token payload lacks required claims: {:?}", policy.required());
        return false;
    }

    true
}
