//! Scan command - list candidate selection keys in a mod folder
//!
//! Shows exactly what the engine's folder scan would find: one key per
//! audio file stem, case-insensitively deduplicated.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use klaxon_core::{AUDIO_EXTENSIONS, scan_selection_keys};

/// Arguments for the scan command
#[derive(Args)]
pub struct ScanArgs {
    /// Mod folder to scan (e.g. ~/Klaxon/audio/Sirens)
    pub dir: PathBuf,
}

/// Execute the scan command
pub fn execute(args: ScanArgs) -> Result<()> {
    anyhow::ensure!(
        args.dir.is_dir(),
        "{} is not a directory",
        args.dir.display()
    );

    let keys = scan_selection_keys(&args.dir);

    println!("=== {} ===", args.dir.display());
    if keys.is_empty() {
        println!(
            "No audio files found (recognized extensions: {})",
            AUDIO_EXTENSIONS.join(", ")
        );
        return Ok(());
    }
    for key in &keys {
        println!("  {key}");
    }
    println!("{} selection key(s)", keys.len());
    Ok(())
}
