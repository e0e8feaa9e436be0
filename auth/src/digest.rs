//! Keyed digest used as the token signature.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use jwt_error::DigestError;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256Mac = Hmac<Sha256>;

/// Computes a url-safe encoded keyed digest of a message.
///
/// Implementations must be deterministic for a given `(message, key)` pair.
pub trait KeyedDigest {
    fn digest(&self, message: &str, key: &str) -> Result<String, DigestError>;
}

/// HMAC-SHA256, encoded as unpadded base64url.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256;

impl KeyedDigest for HmacSha256 {
    fn digest(&self, message: &str, key: &str) -> Result<String, DigestError> {
        if key.is_empty() {
            tracing::error!("Refusing to compute HMAC with an empty key");
            return Err(DigestError::EmptyKey);
        }

        let mut mac = HmacSha256Mac::new_from_slice(key.as_bytes()).map_err(|e| {
            tracing::error!("Failed to create HMAC key: {}", e);
            DigestError::InvalidKey(e.to_string())
        })?;
        mac.update(message.as_bytes());

        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }
}

/// Exact string equality in constant time over equal-length inputs.
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
