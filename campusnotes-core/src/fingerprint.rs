//! Content fingerprinting.
//!
//! Uploads arrive as base64 text that may have picked up stray whitespace in
//! transit. The fingerprint is the SHA-256 digest of the exact decoded bytes,
//! hex-encoded lowercase, so byte-identical uploads always collide and
//! anything else does not.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::error::{ClassifierError, Result};

/// Strip all whitespace from an encoded payload so the canonical byte
/// sequence is recovered before decoding.
pub fn sanitize_base64(encoded: &str) -> String {
    encoded.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Decode base64 content to exact bytes. Malformed input fails with
/// [`ClassifierError::Decode`]; the caller leaves the record without a
/// fingerprint for this run so it is retried on the next load.
pub fn decode_content(encoded: &str) -> Result<Vec<u8>> {
    let cleaned = sanitize_base64(encoded);
    BASE64
        .decode(cleaned.as_bytes())
        .map_err(|e| ClassifierError::Decode(e.to_string()))
}

/// Compute the content fingerprint: SHA-256 over the decoded bytes,
/// lowercase hex. No normalization, no chunking.
pub fn compute_fingerprint(encoded: &str) -> Result<String> {
    let bytes = decode_content(encoded)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Heuristic check for base64-looking text metadata (allows embedded
/// whitespace, requires 4-byte alignment). Used to decide whether a text
/// field is worth a decode attempt, not as validation.
pub fn looks_like_base64(value: &str) -> bool {
    !value.is_empty()
        && value.len() % 4 == 0
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=') || b.is_ascii_whitespace())
}

/// Best-effort decode of a base64-encoded text field. Returns the input
/// unchanged when it does not decode to valid UTF-8.
pub fn decode_text_field(value: &str) -> String {
    match decode_content(value) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // echo -n "hello" | sha256sum
    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn sanitize_strips_all_whitespace() {
        assert_eq!(sanitize_base64("aGVs\n bG8=\t"), "aGVsbG8=");
        assert_eq!(sanitize_base64("aGVsbG8="), "aGVsbG8=");
    }

    #[test]
    fn fingerprint_is_sha256_of_decoded_bytes() {
        let fp = compute_fingerprint("aGVsbG8=").unwrap();
        assert_eq!(fp, HELLO_SHA256);
    }

    #[test]
    fn whitespace_contamination_does_not_change_fingerprint() {
        let clean = compute_fingerprint("aGVsbG8=").unwrap();
        let contaminated = compute_fingerprint("aGVs\nbG8=\r\n").unwrap();
        assert_eq!(clean, contaminated);
    }

    #[test]
    fn different_content_different_fingerprint() {
        let a = compute_fingerprint("aGVsbG8=").unwrap();
        let b = compute_fingerprint("d29ybGQ=").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_input_fails_with_decode_error() {
        let err = compute_fingerprint("!!!not-base64!!!").unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(_)));
    }

    #[test]
    fn base64_heuristic() {
        assert!(looks_like_base64("TGluZWFyIEFsZ2VicmE="));
        assert!(!looks_like_base64("calculus.pdf"));
        assert!(!looks_like_base64(""));
        assert!(!looks_like_base64("abc")); // not 4-aligned
    }

    #[test]
    fn text_decode_falls_back_on_binary_garbage() {
        // decodes to bytes that are not valid UTF-8
        assert_eq!(decode_text_field("/////w=="), "/////w==");
        assert_eq!(decode_text_field("TGluZWFyIEFsZ2VicmE="), "Linear Algebra");
    }
}
