//! Common error types for bearer token issuing and authorization.
//!
//! Low-level codec operations report malformed input as `false` or `None`;
//! only hard faults and authorization failures are represented here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of the keyed digest primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    #[error("Signing key is empty")]
    EmptyKey,

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
}

/// Hard faults raised by the token codec.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Payload serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Digest failed: {0}")]
    Digest(#[from] DigestError),
}

/// Authorization failures, one per guard.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Wrong issuer or audience")]
    WrongIssuerOrAudience,

    #[error("Digest failed: {0}")]
    Upstream(#[from] DigestError),
}

impl AuthError {
    /// Machine-readable reason for the failure.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Malformed(_) => "malformed",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "expired",
            AuthError::WrongIssuerOrAudience => "wrong_issuer_or_audience",
            AuthError::Upstream(_) => "upstream_fault",
        }
    }
}

/// Error response for API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        // Clients see a uniform message; the code tells the kinds apart.
        let code = match &err {
            AuthError::Malformed(_) => "AUTH_MALFORMED_TOKEN",
            AuthError::InvalidSignature => "AUTH_INVALID_SIGNATURE",
            AuthError::Expired => "AUTH_TOKEN_EXPIRED",
            AuthError::WrongIssuerOrAudience => "AUTH_WRONG_ISSUER_OR_AUDIENCE",
            AuthError::Upstream(_) => "AUTH_UPSTREAM_FAULT",
        };
        Self::new(code, "Unauthorized")
    }
}
