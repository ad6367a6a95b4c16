//! Custom error types for vault-export
//!
//! This module defines the error hierarchy for export encryption using thiserror.
//! The two decryption failures (`NotEncrypted` and `DecryptionFailed`) carry no
//! detail beyond their kind.

use thiserror::Error;

/// The main error type for vault-export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// The envelope is not marked as encrypted
    #[error("Data is not encrypted")]
    NotEncrypted,

    /// Wrong password or tampered/corrupted envelope. Both cases share one message.
    #[error("Decryption failed - invalid password or corrupted data")]
    DecryptionFailed,

    /// The envelope was produced by an unknown format version
    #[error("Unsupported export version: '{0}'")]
    UnsupportedVersion(String),

    /// A field required for decryption is missing or empty
    #[error("Malformed export envelope: missing {0}")]
    MalformedEnvelope(&'static str),

    /// Key derivation errors (invalid parameters, resource exhaustion)
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Encryption errors raised while sealing
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl ExportError {
    /// Check if this is the authentication failure raised on decrypt
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailed)
    }

    /// Check if the envelope was rejected for not being encrypted
    pub fn is_not_encrypted(&self) -> bool {
        matches!(self, Self::NotEncrypted)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for vault-export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ExportError::NotEncrypted.to_string(), "Data is not encrypted");
        assert_eq!(
            ExportError::DecryptionFailed.to_string(),
            "Decryption failed - invalid password or corrupted data"
        );
    }

    #[test]
    fn test_malformed_envelope_names_field() {
        let err = ExportError::MalformedEnvelope("salt");
        assert_eq!(err.to_string(), "Malformed export envelope: missing salt");
    }

    #[test]
    fn test_kind_helpers() {
        assert!(ExportError::DecryptionFailed.is_decryption_failure());
        assert!(!ExportError::DecryptionFailed.is_not_encrypted());
        assert!(ExportError::NotEncrypted.is_not_encrypted());
        assert!(!ExportError::Config("x".into()).is_decryption_failure());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let export_err: ExportError = io_err.into();
        assert!(matches!(export_err, ExportError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let export_err: ExportError = json_err.into();
        assert!(matches!(export_err, ExportError::Json(_)));
    }
}
