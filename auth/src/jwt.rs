//! Token construction, signature verification and claims extraction.
//!
//! A token is `<header>.<payload>.<signature>` where the signature is the
//! keyed digest of `<header>.<payload>`. These functions report malformed
//! tokens as `false` or `None` and only fail on hard faults.

use jwt_error::{DigestError, TokenError};
use serde::Serialize;
use serde_json::Value;

use crate::base64url;
use crate::digest::{constant_time_eq, HmacSha256, KeyedDigest};
use crate::header::header_segment;

/// Sign `payload` into a token with HMAC-SHA256.
///
/// The payload is signed as serialized, so object keys keep the order the
/// payload yields them in.
pub fn create_token<T>(payload: &T, key: &str) -> Result<String, TokenError>
where
    T: Serialize + ?Sized,
{
    create_token_with(&HmacSha256, payload, key)
}

/// Sign `payload` into a token with the given digest.
pub fn create_token_with<D, T>(digest: &D, payload: &T, key: &str) -> Result<String, TokenError>
where
    D: KeyedDigest + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(payload).map_err(TokenError::Serialize)?;
    let signing_input = format!("{}.{}", header_segment(), base64url::encode(&json));
    let signature = digest.digest(&signing_input, key)?;

    Ok(format!("{}.{}", signing_input, signature))
}

/// Check a token's signature with HMAC-SHA256.
pub fn verify_token(token: &str, key: &str) -> Result<bool, DigestError> {
    verify_token_with(&HmacSha256, token, key)
}

/// Check a token's signature with the given digest.
///
/// The digest of everything before the last `.` must equal the text after it
/// exactly. A token without a `.` is `Ok(false)`.
pub fn verify_token_with<D>(digest: &D, token: &str, key: &str) -> Result<bool, DigestError>
where
    D: KeyedDigest + ?Sized,
{
    let Some((signing_input, signature)) = token.rsplit_once('.') else {
        return Ok(false);
    };

    let expected = digest.digest(signing_input, key)?;
    Ok(constant_time_eq(&expected, signature))
}

/// Read the payload of a token without checking its signature.
///
/// Returns `Ok(None)` when the token has fewer than two `.` separators. A
/// payload segment that does not decode to JSON is a [`TokenError::InvalidJson`].
pub fn extract_claims(token: &str) -> Result<Option<Value>, TokenError> {
    let (Some(first), Some(last)) = (token.find('.'), token.rfind('.')) else {
        return Ok(None);
    };
    if first == last {
        return Ok(None);
    }

    let payload = base64url::decode(&token[first + 1..last]);
    serde_json::from_str(&payload)
        .map(Some)
        .map_err(TokenError::InvalidJson)
}
