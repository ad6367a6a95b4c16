//! Password-protected export envelopes
//!
//! - `envelope`: the seven-field record, its constants and validation
//! - `cipher`: encrypt/decrypt orchestration over the crypto ports

pub mod cipher;
pub mod envelope;

pub use cipher::{decrypt_export_data, encrypt_export_data, ExportCipher};
pub use envelope::{EncryptedExport, EXPORT_ALGORITHM, EXPORT_FORMAT_VERSION, EXPORT_KDF};
