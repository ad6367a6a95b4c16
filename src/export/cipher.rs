//! Export encryption and decryption
//!
//! `ExportCipher` wires the transport codec, the key derivation port and the
//! AEAD port together. It holds no per-call state; each call derives its own
//! key and generates its own salt and nonce.

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::codec;
use crate::crypto::{
    AeadCipher, Argon2Kdf, KdfParams, KeyDerivation, OpenOutcome, XSalsa20Poly1305Cipher,
};
use crate::error::{ExportError, ExportResult};

use super::envelope::EncryptedExport;

/// Encrypts and decrypts export envelopes through a pair of crypto ports
#[derive(Debug, Clone, Default)]
pub struct ExportCipher<K = Argon2Kdf, A = XSalsa20Poly1305Cipher> {
    kdf: K,
    aead: A,
}

impl ExportCipher {
    /// Default adapters with default Argon2id parameters
    pub fn new() -> Self {
        Self::with_kdf_params(KdfParams::default())
    }

    /// Default adapters with the given Argon2id parameters
    pub fn with_kdf_params(params: KdfParams) -> Self {
        Self::with_ports(Argon2Kdf::new(params), XSalsa20Poly1305Cipher::new())
    }
}

impl<K, A> ExportCipher<K, A>
where
    K: KeyDerivation,
    A: AeadCipher,
{
    pub fn with_ports(kdf: K, aead: A) -> Self {
        Self { kdf, aead }
    }

    /// Encrypt arbitrary bytes under `password`
    pub fn encrypt(&self, plaintext: &[u8], password: &str) -> ExportResult<EncryptedExport> {
        debug!(plaintext_len = plaintext.len(), "encrypting export");

        let password_encoded = Zeroizing::new(codec::encode(password));
        let derived = self.kdf.derive_for_encryption(&password_encoded)?;

        let plaintext_encoded = Zeroizing::new(codec::encode(plaintext));
        let sealed = self.aead.seal(&derived.key, &plaintext_encoded)?;

        let envelope = EncryptedExport::assemble(derived.salt, sealed);
        debug!(
            ciphertext_len = envelope.ciphertext().len(),
            "export encrypted"
        );
        Ok(envelope)
    }

    /// Encrypt a UTF-8 string under `password`
    pub fn encrypt_string(&self, plaintext: &str, password: &str) -> ExportResult<EncryptedExport> {
        self.encrypt(plaintext.as_bytes(), password)
    }

    /// Decrypt an envelope back to the original bytes
    ///
    /// Fails with `NotEncrypted` before any key derivation if the envelope is
    /// not marked encrypted. Wrong passwords and tampered envelopes both fail
    /// with `DecryptionFailed`.
    pub fn decrypt(&self, envelope: &EncryptedExport, password: &str) -> ExportResult<Vec<u8>> {
        if let Err(err) = envelope.validate() {
            warn!(error = %err, "rejected export envelope");
            return Err(err);
        }

        let password_encoded = Zeroizing::new(codec::encode(password));
        let key = self
            .kdf
            .derive_for_decryption(&password_encoded, envelope.salt())?;

        let plaintext_encoded =
            match self
                .aead
                .open(envelope.ciphertext(), envelope.nonce(), &key)?
            {
                OpenOutcome::Opened(encoded) => encoded,
                OpenOutcome::AuthenticationFailed => {
                    debug!("export authentication failed");
                    return Err(ExportError::DecryptionFailed);
                }
            };

        let plaintext =
            codec::decode(&plaintext_encoded).map_err(|_| ExportError::DecryptionFailed)?;
        debug!(plaintext_len = plaintext.len(), "export decrypted");
        Ok(plaintext)
    }

    /// Decrypt an envelope whose plaintext is UTF-8 text
    pub fn decrypt_string(&self, envelope: &EncryptedExport, password: &str) -> ExportResult<String> {
        let plaintext = self.decrypt(envelope, password)?;
        String::from_utf8(plaintext).map_err(|_| ExportError::DecryptionFailed)
    }
}

/// Encrypt `data` under `password` with the default Argon2id / XSalsa20-Poly1305 adapters
pub fn encrypt_export_data(data: &str, password: &str) -> ExportResult<EncryptedExport> {
    ExportCipher::new().encrypt_string(data, password)
}

/// Decrypt an envelope produced by [`encrypt_export_data`]
pub fn decrypt_export_data(envelope: &EncryptedExport, password: &str) -> ExportResult<String> {
    ExportCipher::new().decrypt_string(envelope, password)
}
