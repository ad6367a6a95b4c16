//! User settings for vault-export
//!
//! Holds the Argon2id cost parameters and output preferences. The KDF
//! parameters are not recorded in envelopes, so an export can only be opened
//! with the same parameters it was sealed with.

use serde::{Deserialize, Serialize};

use super::paths::ExportPaths;
use crate::crypto::KdfParams;
use crate::error::ExportError;

/// User settings for vault-export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Argon2id cost parameters
    #[serde(default)]
    pub kdf: KdfParams,

    /// Write envelopes as pretty-printed JSON
    #[serde(default = "default_pretty_output")]
    pub pretty_output: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_pretty_output() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            kdf: KdfParams::default(),
            pretty_output: default_pretty_output(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults on first run
    pub fn load_or_create(paths: &ExportPaths) -> Result<Self, ExportError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            let settings = Settings::default();
            settings.save(paths)?;
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExportError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExportError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExportPaths) -> Result<(), ExportError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExportError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.kdf, KdfParams::default());
        assert!(settings.pretty_output);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().join("nested").join("config"));
        assert!(!paths.settings_file().exists());

        assert_eq!(Settings::load_or_create(&paths).unwrap(), Settings::default());
        assert!(paths.settings_file().exists());

        let written: Settings =
            serde_json::from_str(&std::fs::read_to_string(paths.settings_file()).unwrap()).unwrap();
        assert_eq!(written, Settings::default());
        assert_eq!(Settings::load_or_create(&paths).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            kdf: KdfParams::with_values(19456, 2, 1),
            pretty_output: false,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"pretty_output": false}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.pretty_output);
        assert_eq!(loaded.kdf, KdfParams::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }
}
