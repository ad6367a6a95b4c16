//! Key derivation using Argon2id
//!
//! Defines the `KeyDerivation` port consumed by the export cipher and its
//! Argon2id adapter. Passwords and salts cross this boundary in base64
//! transport form.

use argon2::{
    password_hash::rand_core::{OsRng, RngCore},
    Argon2, Params,
};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec;
use crate::error::{ExportError, ExportResult};

/// Length of derived keys in bytes (XSalsa20-Poly1305 uses 256-bit keys)
pub const KEY_SIZE: usize = 32;

/// Length of freshly generated salts in bytes
pub const SALT_SIZE: usize = 16;

/// Parameters for key derivation
///
/// These are not stored in the envelope, so the encrypting and the
/// decrypting side must agree on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub memory_cost: u32,
    /// Time cost (iterations, default: 3)
    pub time_cost: u32,
    /// Parallelism degree (default: 1)
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 65536, // 64 MiB
            time_cost: 3,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Create params with specific values
    pub fn with_values(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    fn to_argon2(self) -> ExportResult<Argon2<'static>> {
        let params = Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(KEY_SIZE),
        )
        .map_err(|e| ExportError::KeyDerivation(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }
}

/// A derived encryption key, zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Wrap raw key bytes produced by a key derivation adapter
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { key: bytes }
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Output of a key derivation for encryption: the key plus the salt it was derived with
#[derive(Debug)]
pub struct KeyDerivationResult {
    pub key: DerivedKey,
    /// Salt in base64 transport form
    pub salt: String,
}

/// Password-based key derivation port
pub trait KeyDerivation {
    /// Derive a key under a freshly generated salt. Salts must never repeat.
    fn derive_for_encryption(&self, password_encoded: &str) -> ExportResult<KeyDerivationResult>;

    /// Re-derive the key for a stored salt. Deterministic for identical inputs.
    fn derive_for_decryption(
        &self,
        password_encoded: &str,
        salt_encoded: &str,
    ) -> ExportResult<DerivedKey>;
}

/// Argon2id adapter for the key derivation port
#[derive(Debug, Clone, Default)]
pub struct Argon2Kdf {
    params: KdfParams,
}

impl Argon2Kdf {
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    fn derive(&self, password_encoded: &str, salt: &[u8]) -> ExportResult<DerivedKey> {
        let argon2 = self.params.to_argon2()?;

        let mut key = [0u8; KEY_SIZE];
        argon2
            .hash_password_into(password_encoded.as_bytes(), salt, &mut key)
            .map_err(|e| ExportError::KeyDerivation(format!("Key derivation failed: {}", e)))?;

        let derived = DerivedKey::from_bytes(key);
        key.zeroize();
        Ok(derived)
    }
}

impl KeyDerivation for Argon2Kdf {
    fn derive_for_encryption(&self, password_encoded: &str) -> ExportResult<KeyDerivationResult> {
        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);

        let key = self.derive(password_encoded, &salt)?;

        Ok(KeyDerivationResult {
            key,
            salt: codec::encode(salt),
        })
    }

    fn derive_for_decryption(
        &self,
        password_encoded: &str,
        salt_encoded: &str,
    ) -> ExportResult<DerivedKey> {
        // A salt we could not have produced is treated like any other tampering
        let salt = codec::decode(salt_encoded).map_err(|_| ExportError::DecryptionFailed)?;
        if salt.len() != SALT_SIZE {
            return Err(ExportError::DecryptionFailed);
        }

        self.derive(password_encoded, &salt)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Cheap parameters so tests don't spend 64 MiB per derivation
    pub(crate) fn fast_params() -> KdfParams {
        KdfParams::with_values(1024, 1, 1)
    }

    fn kdf() -> Argon2Kdf {
        Argon2Kdf::new(fast_params())
    }

    #[test]
    fn test_default_params() {
        let params = KdfParams::default();
        assert_eq!(params.memory_cost, 65536);
        assert_eq!(params.time_cost, 3);
        assert_eq!(params.parallelism, 1);
    }

    #[test]
    fn test_encryption_salt_is_fresh() {
        let kdf = kdf();
        let first = kdf.derive_for_encryption("cGFzc3dvcmQ=").unwrap();
        let second = kdf.derive_for_encryption("cGFzc3dvcmQ=").unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.key.as_bytes(), second.key.as_bytes());
        assert_eq!(codec::decode(&first.salt).unwrap().len(), SALT_SIZE);
    }

    #[test]
    fn test_same_password_same_salt_same_key() {
        let kdf = kdf();
        let derived = kdf.derive_for_encryption("cGFzc3dvcmQ=").unwrap();
        let again = kdf
            .derive_for_decryption("cGFzc3dvcmQ=", &derived.salt)
            .unwrap();

        assert_eq!(derived.key.as_bytes(), again.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let kdf = kdf();
        let derived = kdf.derive_for_encryption("cGFzc3dvcmQ=").unwrap();
        let other = kdf
            .derive_for_decryption("d3Jvbmc=", &derived.salt)
            .unwrap();

        assert_ne!(derived.key.as_bytes(), other.as_bytes());
    }

    #[test]
    fn test_empty_password_accepted() {
        let kdf = kdf();
        assert!(kdf.derive_for_encryption("").is_ok());
    }

    #[test]
    fn test_bad_salt_is_decryption_failure() {
        let kdf = kdf();
        let err = kdf.derive_for_decryption("cGFzc3dvcmQ=", "%%%").unwrap_err();
        assert!(err.is_decryption_failure());

        let short = codec::encode([0u8; 4]);
        let err = kdf.derive_for_decryption("cGFzc3dvcmQ=", &short).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let kdf = Argon2Kdf::new(KdfParams::with_values(1, 0, 0));
        let err = kdf.derive_for_encryption("cGFzc3dvcmQ=").unwrap_err();
        assert!(matches!(err, ExportError::KeyDerivation(_)));
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = DerivedKey::from_bytes([0xAB; KEY_SIZE]);
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("171"));
    }
}
