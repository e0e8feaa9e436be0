//! HS256 bearer token issuing and verification.
//!
//! Tokens have the shape `<header>.<payload>.<signature>` with a fixed
//! `{"typ":"JWT","alg":"HS256"}` header and an HMAC-SHA256 signature over
//! the first two segments. [`authorize`] runs the full check of an
//! `Authorization: Bearer <token>` header value.

mod authorize;
pub mod base64url;
mod claims;
mod digest;
mod header;
mod jwt;
mod shape;

pub use authorize::{authorize, authorize_at, authorize_with, AuthConfig};
pub use claims::{Claims, ClaimsExt, RegisteredClaims};
pub use digest::{HmacSha256, KeyedDigest};
pub use header::{bearer_prefix, header_segment, Header, BEARER_SCHEME, HEADER};
pub use jwt::{create_token, create_token_with, extract_claims, verify_token, verify_token_with};
pub use shape::{looks_like_token, looks_like_token_with, ClaimPolicy};

pub use jwt_error::{AuthError, DigestError, ErrorResponse, TokenError};
