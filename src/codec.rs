//! Transport codec
//!
//! Lossless conversion between raw bytes and the base64 text form that is
//! handed to the crypto ports and stored in the envelope.

use base64::{engine::general_purpose::STANDARD, DecodeError, Engine};

/// Encode bytes to standard (padded) base64
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64 back to bytes
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_value() {
        assert_eq!(encode("hello world"), "aGVsbG8gd29ybGQ=");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_unicode_and_binary_survive() {
        let text = "pässwörd 🔐 日本語";
        assert_eq!(decode(&encode(text)).unwrap(), text.as_bytes());

        let binary: Vec<u8> = (0..=255).collect();
        assert_eq!(decode(&encode(&binary)).unwrap(), binary);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not base64!").is_err());
    }
}
