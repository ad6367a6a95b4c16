//! Path management for vault-export
//!
//! ## Path Resolution Order
//!
//! 1. `VAULT_EXPORT_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/vault-export` on Linux,
//!    `~/Library/Application Support/vault-export` on macOS, `%APPDATA%` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ExportError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "VAULT_EXPORT_CONFIG_DIR";

/// Manages all paths used by vault-export
#[derive(Debug, Clone)]
pub struct ExportPaths {
    base_dir: PathBuf,
}

impl ExportPaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ExportError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ExportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn ensure_directories(&self) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExportError::Io(format!("Failed to create config directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, ExportError> {
    ProjectDirs::from("", "", "vault-export")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ExportError::Config("Could not determine config directory".into()))
}
