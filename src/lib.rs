//! vault-export - password-protected export envelopes
//!
//! Turns sensitive application data (for example a vault dump) into a
//! self-describing encrypted envelope, and back again given the same password.
//!
//! # Architecture
//!
//! - `codec`: base64 transport encoding
//! - `crypto`: key derivation and AEAD ports with Argon2id / XSalsa20-Poly1305 adapters
//! - `export`: the envelope record and the encrypt/decrypt orchestration
//! - `error`: custom error types
//! - `config`, `file_io`, `cli`: the command-line front end
//!
//! # Example
//!
//! ```rust,no_run
//! use vault_export::{decrypt_export_data, encrypt_export_data};
//!
//! let envelope = encrypt_export_data("hello world", "correct-horse")?;
//! let json = envelope.to_json()?;
//! assert_eq!(decrypt_export_data(&envelope, "correct-horse")?, "hello world");
//! # let _ = json;
//! # Ok::<(), vault_export::ExportError>(())
//! ```
//!
//! Key derivation is deliberately slow and memory-hard. Callers on an event
//! loop should run encrypt/decrypt on a worker thread.

pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod export;
pub mod file_io;

pub use error::{ExportError, ExportResult};
pub use export::{decrypt_export_data, encrypt_export_data, EncryptedExport, ExportCipher};
