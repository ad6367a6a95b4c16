//! Cryptographic ports and adapters for vault-export
//!
//! The export cipher talks to two narrow ports so the primitive library can
//! be swapped without touching envelope or orchestration logic:
//!
//! - [`KeyDerivation`], implemented by [`Argon2Kdf`] (Argon2id)
//! - [`AeadCipher`], implemented by [`XSalsa20Poly1305Cipher`]

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{AeadCipher, OpenOutcome, SealedPayload, XSalsa20Poly1305Cipher};
pub use key_derivation::{Argon2Kdf, DerivedKey, KdfParams, KeyDerivation, KeyDerivationResult};
pub use secure_memory::SecureString;
