use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vault_export::cli::{handle_export_command, ExportCommands};
use vault_export::config::{paths::ExportPaths, settings::Settings};
use vault_export::export::{EXPORT_ALGORITHM, EXPORT_FORMAT_VERSION, EXPORT_KDF};

#[derive(Parser)]
#[command(
    name = "vault-export",
    author = "Kaylee Beyene",
    version,
    about = "Password-protected export envelopes for sensitive vault data",
    long_about = "vault-export seals a file into a self-describing encrypted envelope \
                  (Argon2id key derivation, XSalsa20-Poly1305 encryption) and opens \
                  it again with the same password."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Export(ExportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = ExportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Export(cmd) => handle_export_command(&settings, cmd)?,
        Commands::Config => {
            println!("vault-export Configuration");
            println!("==========================");
            println!();
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Envelope version: {}", EXPORT_FORMAT_VERSION);
            println!("Algorithm:        {}", EXPORT_ALGORITHM);
            println!("KDF:              {}", EXPORT_KDF);
            println!("  Memory Cost:    {} KiB", settings.kdf.memory_cost);
            println!("  Time Cost:      {} iterations", settings.kdf.time_cost);
            println!("  Parallelism:    {} lanes", settings.kdf.parallelism);
            println!("Pretty output:    {}", settings.pretty_output);
        }
    }

    Ok(())
}
