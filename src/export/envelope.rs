//! Encrypted export envelope
//!
//! The envelope is the only artifact that leaves this crate. It serializes as
//! a flat JSON object with exactly seven scalar fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::crypto::SealedPayload;
use crate::error::{ExportError, ExportResult};

/// Envelope format version written by this crate and accepted on decrypt
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// AEAD identifier recorded in every envelope (informational only)
pub const EXPORT_ALGORITHM: &str = "XSalsa20-Poly1305";

/// KDF identifier recorded in every envelope (informational only)
pub const EXPORT_KDF: &str = "Argon2id";

/// Password-protected export envelope
///
/// Fields are read-only once assembled. Missing or wrong-typed fields
/// deserialize to their defaults, and `encrypted` is only set by a literal
/// `true`, so any foreign document still parses and is then rejected by
/// [`EncryptedExport::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedExport {
    #[serde(default, deserialize_with = "lenient_string")]
    version: String,
    #[serde(default, deserialize_with = "lenient_flag")]
    encrypted: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    algorithm: String,
    #[serde(default, deserialize_with = "lenient_string")]
    kdf: String,
    #[serde(default, deserialize_with = "lenient_string")]
    salt: String,
    #[serde(default, deserialize_with = "lenient_string")]
    nonce: String,
    #[serde(default, deserialize_with = "lenient_string")]
    ciphertext: String,
}

/// Non-string values (null, numbers, objects) read as an empty field
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// Anything other than boolean `true` means not encrypted
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

impl EncryptedExport {
    /// Package KDF and AEAD output together with the fixed metadata
    pub(crate) fn assemble(salt: String, sealed: SealedPayload) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION.to_string(),
            encrypted: true,
            algorithm: EXPORT_ALGORITHM.to_string(),
            kdf: EXPORT_KDF.to_string(),
            salt,
            nonce: sealed.nonce,
            ciphertext: sealed.ciphertext,
        }
    }

    /// Check the envelope can be handed to the crypto ports.
    ///
    /// The `encrypted` flag is checked first; nothing else about an
    /// unencrypted envelope is inspected.
    pub fn validate(&self) -> ExportResult<()> {
        if !self.encrypted {
            return Err(ExportError::NotEncrypted);
        }

        if self.version != EXPORT_FORMAT_VERSION {
            return Err(ExportError::UnsupportedVersion(self.version.clone()));
        }

        for (field, value) in [
            ("salt", &self.salt),
            ("nonce", &self.nonce),
            ("ciphertext", &self.ciphertext),
        ] {
            if value.is_empty() {
                return Err(ExportError::MalformedEnvelope(field));
            }
        }

        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn kdf(&self) -> &str {
        &self.kdf
    }

    /// Base64 salt used for key derivation
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Base64 nonce the ciphertext was sealed with
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Base64 sealed payload
    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// Parse an envelope from JSON
    pub fn from_json(json: &str) -> ExportResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ExportError::Json(format!("Invalid export envelope: {}", e)))
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
