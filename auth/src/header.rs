//! The fixed token header.
//!
//! Every token carries the same header, so its encoded segment is computed
//! once per process and shared read-only afterwards.

use std::sync::LazyLock;

use serde::Serialize;

use crate::base64url;

/// Authorization scheme accepted in front of a token.
pub const BEARER_SCHEME: &str = "Bearer ";

/// JOSE header. Field order is `typ`, then `alg`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Header {
    pub typ: &'static str,
    pub alg: &'static str,
}

/// The only header this crate issues or accepts.
pub const HEADER: Header = Header {
    typ: "JWT",
    alg: "HS256",
};

static HEADER_SEGMENT: LazyLock<String> = LazyLock::new(|| {
    // Two static strings always serialize.
    let json = serde_json::to_string(&HEADER).unwrap_or_default();
    base64url::encode(&json)
});

static BEARER_PREFIX: LazyLock<String> =
    LazyLock::new(|| format!("{}{}.", BEARER_SCHEME, header_segment()));

/// Base64url-encoded header segment.
pub fn header_segment() -> &'static str {
    &HEADER_SEGMENT
}

/// `Bearer <header segment>.`, the prefix every authorization value must start with.
pub fn bearer_prefix() -> &'static str {
    &BEARER_PREFIX
}
