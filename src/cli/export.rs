//! Export encryption CLI commands
//!
//! Provides commands for sealing a file into an export envelope, opening an
//! envelope back into a file, and inspecting envelope metadata.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use zeroize::Zeroizing;

use crate::codec;
use crate::config::settings::Settings;
use crate::crypto::SecureString;
use crate::error::{ExportError, ExportResult};
use crate::export::{EncryptedExport, ExportCipher};
use crate::file_io;

/// Export envelope commands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Encrypt a file into a password-protected export envelope
    Encrypt {
        /// Plaintext file to encrypt
        input: PathBuf,

        /// Where to write the envelope JSON
        output: PathBuf,

        /// Read the password from the first line of stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },

    /// Decrypt an export envelope back into its original contents
    Decrypt {
        /// Envelope JSON file
        input: PathBuf,

        /// Where to write the decrypted contents
        output: PathBuf,

        /// Read the password from the first line of stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },

    /// Show envelope metadata without decrypting
    Inspect {
        /// Envelope JSON file
        input: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(settings: &Settings, cmd: ExportCommands) -> ExportResult<()> {
    match cmd {
        ExportCommands::Encrypt {
            input,
            output,
            password_stdin,
        } => encrypt_file(settings, &input, &output, password_stdin),
        ExportCommands::Decrypt {
            input,
            output,
            password_stdin,
        } => decrypt_file(settings, &input, &output, password_stdin),
        ExportCommands::Inspect { input } => inspect_file(&input),
    }
}

fn encrypt_file(
    settings: &Settings,
    input: &Path,
    output: &Path,
    password_stdin: bool,
) -> ExportResult<()> {
    let plaintext = file_io::read_bytes(input)?;

    let password = if password_stdin {
        read_password_stdin()?
    } else {
        prompt_new_password()?
    };

    println!("Deriving encryption key...");
    let envelope = ExportCipher::with_kdf_params(settings.kdf).encrypt(&plaintext, &password)?;

    let json = if settings.pretty_output {
        envelope.to_json_pretty()?
    } else {
        envelope.to_json()?
    };
    file_io::write_atomic(output, json.as_bytes())?;

    println!(
        "Encrypted {} bytes to {}",
        plaintext.len(),
        output.display()
    );
    Ok(())
}

fn decrypt_file(
    settings: &Settings,
    input: &Path,
    output: &Path,
    password_stdin: bool,
) -> ExportResult<()> {
    let envelope = file_io::read_envelope(input)?;

    // Reject before asking for a password we would never use
    envelope.validate()?;

    let password = if password_stdin {
        read_password_stdin()?
    } else {
        prompt_password("Enter password: ")?
    };

    println!("Deriving decryption key...");
    let plaintext = ExportCipher::with_kdf_params(settings.kdf).decrypt(&envelope, &password)?;
    file_io::write_atomic(output, &plaintext)?;

    println!(
        "Decrypted {} bytes to {}",
        plaintext.len(),
        output.display()
    );
    Ok(())
}

fn inspect_file(input: &Path) -> ExportResult<()> {
    let envelope = file_io::read_envelope(input)?;

    println!("Export Envelope");
    println!("===============");
    println!();
    print_envelope(&envelope);

    Ok(())
}

fn print_envelope(envelope: &EncryptedExport) {
    println!("Encrypted:  {}", if envelope.is_encrypted() { "yes" } else { "no" });
    println!("Version:    {}", envelope.version());
    println!("Algorithm:  {}", envelope.algorithm());
    println!("KDF:        {}", envelope.kdf());
    println!("Salt:       {}", describe_field(envelope.salt()));
    println!("Nonce:      {}", describe_field(envelope.nonce()));
    println!("Ciphertext: {}", describe_field(envelope.ciphertext()));
    println!();

    match envelope.validate() {
        Ok(()) => println!("Status: ready to decrypt"),
        Err(e) => println!("Status: {}", e),
    }
}

fn describe_field(value: &str) -> String {
    if value.is_empty() {
        return "(missing)".to_string();
    }
    match codec::decode(value) {
        Ok(bytes) => format!("{} bytes", bytes.len()),
        Err(_) => "(not valid base64)".to_string(),
    }
}

/// Prompt for a new password with confirmation
fn prompt_new_password() -> ExportResult<SecureString> {
    loop {
        let first = prompt_password("Enter new password: ")?;
        let second = prompt_password("Confirm password: ")?;

        if first != second {
            println!("Passwords do not match. Please try again.");
            continue;
        }

        if first.is_empty() {
            println!("Warning: encrypting with an empty password.");
        }

        return Ok(first);
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> ExportResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| ExportError::Io(format!("Failed to read password: {}", e)))
}

/// Read one line from stdin as the password, without its line ending
fn read_password_stdin() -> ExportResult<SecureString> {
    let mut buffer = Zeroizing::new(String::new());
    std::io::stdin()
        .lock()
        .read_line(&mut buffer)
        .map_err(|e| ExportError::Io(format!("Failed to read password from stdin: {}", e)))?;

    Ok(SecureString::from(buffer.trim_end_matches(['\n', '\r'])))
}
