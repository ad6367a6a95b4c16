//! CLI command handlers
//!
//! Bridges clap argument parsing with the export cipher.

pub mod export;

pub use export::{handle_export_command, ExportCommands};
