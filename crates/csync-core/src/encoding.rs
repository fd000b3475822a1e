//! Base64 helpers for the wire encoding used by the content store.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{StoreError, StoreResult};

/// Encode raw bytes for the wire.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode wire content back to raw bytes.
///
/// The GitHub contents API wraps base64 at 60 columns; whitespace is
/// stripped before decoding.
pub fn from_base64(content: &str) -> StoreResult<Vec<u8>> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| StoreError::Encoding(format!("invalid base64 payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let payload = b"%PDF-1.4 um contrato assinado";
        assert_eq!(from_base64(&to_base64(payload)).unwrap(), payload);
    }

    #[test]
    fn tolerates_wrapped_content() {
        // As returned by the contents API: wrapped with newlines
        let wrapped = "JVBERi0xLjQgdW0g\nY29udHJhdG8gYXNz\naW5hZG8=\n";
        assert_eq!(
            from_base64(wrapped).unwrap(),
            b"%PDF-1.4 um contrato assinado"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            from_base64("definitely*not*base64!!"),
            Err(StoreError::Encoding(_))
        ));
    }
}
