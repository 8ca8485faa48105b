//! Klaxon CLI - Offline diagnostics for Klaxon audio packs
//!
//! # Commands
//!
//! - `klaxon check` - Validate a configuration document
//! - `klaxon scan` - List candidate selection keys in a mod folder
//! - `klaxon resolve` - Dry-run resolution for every configured target
//!
//! # Usage
//!
//! ```bash
//! # Validate a config before shipping it
//! klaxon check klaxon.json
//!
//! # See which selection keys a folder of audio files provides
//! klaxon scan ~/Klaxon/audio/Sirens
//!
//! # Preview what the engine would apply, without a running game
//! klaxon resolve klaxon.json --root ~/Klaxon/audio
//! ```

mod check;
mod resolve;
mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Klaxon CLI - Offline diagnostics for Klaxon audio packs
#[derive(Parser)]
#[command(name = "klaxon")]
#[command(about = "Offline diagnostics for Klaxon audio packs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration document
    Check(check::CheckArgs),

    /// List candidate selection keys in a mod folder
    Scan(scan::ScanArgs),

    /// Dry-run resolution for every configured target
    Resolve(resolve::ResolveArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => check::execute(args),
        Commands::Scan(args) => scan::execute(args),
        Commands::Resolve(args) => resolve::execute(args),
    }
}
