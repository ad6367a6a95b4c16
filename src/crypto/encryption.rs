//! XSalsa20-Poly1305 encryption/decryption
//!
//! Defines the `AeadCipher` port and its XSalsa20-Poly1305 adapter.
//! Each seal operation generates a unique random 192-bit nonce.

use std::fmt;

use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{Aead, AeadCore, KeyInit, OsRng};
use crypto_secretbox::XSalsa20Poly1305;
use zeroize::Zeroizing;

use crate::codec;
use crate::error::{ExportError, ExportResult};

use super::DerivedKey;

/// Size of the XSalsa20 nonce in bytes (192 bits)
pub const NONCE_SIZE: usize = 24;

/// Size of the Poly1305 authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Ciphertext and nonce produced by a seal, both in base64 transport form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    pub ciphertext: String,
    pub nonce: String,
}

/// Result of an authenticated open
///
/// Authentication failure is an ordinary outcome, not an error: a successful
/// open of an empty payload is `Opened("")`, never a failure.
pub enum OpenOutcome {
    /// The recovered plaintext in base64 transport form
    Opened(Zeroizing<String>),
    /// Wrong key, tampered ciphertext or nonce, or undecodable input
    AuthenticationFailed,
}

impl fmt::Debug for OpenOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opened(text) => f.debug_struct("Opened").field("len", &text.len()).finish(),
            Self::AuthenticationFailed => f.write_str("AuthenticationFailed"),
        }
    }
}

impl OpenOutcome {
    pub fn is_opened(&self) -> bool {
        matches!(self, Self::Opened(_))
    }
}

/// Authenticated encryption port
pub trait AeadCipher {
    /// Seal transport-encoded plaintext under `key` with a fresh nonce
    fn seal(&self, key: &DerivedKey, plaintext_encoded: &str) -> ExportResult<SealedPayload>;

    /// Open a sealed payload, reporting authentication failure as an outcome
    fn open(
        &self,
        ciphertext_encoded: &str,
        nonce_encoded: &str,
        key: &DerivedKey,
    ) -> ExportResult<OpenOutcome>;
}

/// XSalsa20-Poly1305 adapter for the AEAD port
#[derive(Debug, Clone, Copy, Default)]
pub struct XSalsa20Poly1305Cipher;

impl XSalsa20Poly1305Cipher {
    pub fn new() -> Self {
        Self
    }

    fn cipher(key: &DerivedKey) -> ExportResult<XSalsa20Poly1305> {
        XSalsa20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|e| ExportError::Encryption(format!("Failed to create cipher: {}", e)))
    }
}

impl AeadCipher for XSalsa20Poly1305Cipher {
    fn seal(&self, key: &DerivedKey, plaintext_encoded: &str) -> ExportResult<SealedPayload> {
        let cipher = Self::cipher(key)?;
        let nonce = XSalsa20Poly1305::generate_nonce(&mut OsRng);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext_encoded.as_bytes())
            .map_err(|e| ExportError::Encryption(format!("Encryption failed: {}", e)))?;

        Ok(SealedPayload {
            ciphertext: codec::encode(&ciphertext),
            nonce: codec::encode(nonce.as_slice()),
        })
    }

    fn open(
        &self,
        ciphertext_encoded: &str,
        nonce_encoded: &str,
        key: &DerivedKey,
    ) -> ExportResult<OpenOutcome> {
        let cipher = Self::cipher(key)?;

        let Ok(nonce_bytes) = codec::decode(nonce_encoded) else {
            return Ok(OpenOutcome::AuthenticationFailed);
        };
        if nonce_bytes.len() != NONCE_SIZE {
            return Ok(OpenOutcome::AuthenticationFailed);
        }
        let Ok(ciphertext) = codec::decode(ciphertext_encoded) else {
            return Ok(OpenOutcome::AuthenticationFailed);
        };
        if ciphertext.len() < TAG_SIZE {
            return Ok(OpenOutcome::AuthenticationFailed);
        }

        let nonce = GenericArray::from_slice(&nonce_bytes);
        let Ok(plaintext) = cipher.decrypt(nonce, ciphertext.as_slice()) else {
            return Ok(OpenOutcome::AuthenticationFailed);
        };
        let plaintext = Zeroizing::new(plaintext);

        // Sealed payloads are always base64 text; anything else cannot be ours
        match std::str::from_utf8(&plaintext) {
            Ok(text) => Ok(OpenOutcome::Opened(Zeroizing::new(text.to_owned()))),
            Err(_) => Ok(OpenOutcome::AuthenticationFailed),
        }
    }
}
