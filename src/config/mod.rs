//! Configuration module for vault-export
//!
//! - Config directory resolution
//! - User settings persistence (KDF cost parameters, output format)

pub mod paths;
pub mod settings;

pub use paths::ExportPaths;
pub use settings::Settings;
