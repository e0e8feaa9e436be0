//! URL-safe base64 without padding.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode text as unpadded base64url.
pub fn encode(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}

/// Decode an unpadded base64url segment into text.
///
/// Returns an empty string when the segment is not valid base64url or does
/// not decode to UTF-8.
pub fn decode(segment: &str) -> String {
    URL_SAFE_NO_PAD
        .decode(segment)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default()
}
