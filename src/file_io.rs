//! File I/O utilities with atomic writes
//!
//! Envelopes and decrypted exports are written to a temp file and renamed
//! into place so a crash never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ExportError, ExportResult};
use crate::export::EncryptedExport;

/// Read a file's full contents
pub fn read_bytes<P: AsRef<Path>>(path: P) -> ExportResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| ExportError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Read and parse an envelope from a JSON file
pub fn read_envelope<P: AsRef<Path>>(path: P) -> ExportResult<EncryptedExport> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| ExportError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    EncryptedExport::from_json(&contents)
}

/// Write bytes to a file atomically (write to temp, then rename)
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> ExportResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExportError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let file = File::create(temp_path)
        .map_err(|e| ExportError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .map_err(|e| ExportError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ExportError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ExportError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        ExportError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("export.json");

        write_atomic(&path, b"{\"encrypted\": false}").unwrap();

        assert_eq!(read_bytes(&path).unwrap(), b"{\"encrypted\": false}");
        assert!(!temp_dir.path().join("out").join("export.json.tmp").exists());
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(read_bytes(&path).unwrap(), b"second");
    }

    #[test]
    fn test_read_envelope() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        fs::write(&path, r#"{"encrypted": false}"#).unwrap();

        let envelope = read_envelope(&path).unwrap();
        assert!(!envelope.is_encrypted());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_envelope(temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
