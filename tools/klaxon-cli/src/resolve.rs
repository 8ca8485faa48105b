//! Resolve command - dry-run resolution against the on-disk folders
//!
//! Runs the engine's resolution pipeline for every configured target
//! without a running game: selections resolve against the real mod
//! directory, files load synchronously, and the per-target outcome
//! (custom file, mute, or engine default) is printed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use klaxon_core::{
    ClipHandle, ClipLoad, ClipLoader, DirectoryFileResolver, Domain, LoadCache, Resolution,
    default_mod_dir, resolve_selection,
};
use klaxon_shared::{DomainSettings, ModConfig};

/// Arguments for the resolve command
#[derive(Args)]
pub struct ResolveArgs {
    /// Configuration document to resolve (klaxon.json)
    pub config: PathBuf,

    /// Root directory holding the per-domain custom folders
    /// (defaults to the platform data directory)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

/// Synchronous stand-in for the game's async clip loader. A file that
/// exists counts as loadable; handles are synthetic.
#[derive(Default)]
struct DryRunLoader {
    next_handle: u32,
}

impl ClipLoader for DryRunLoader {
    fn load(&mut self, path: &Path) -> ClipLoad {
        if path.is_file() {
            self.next_handle += 1;
            ClipLoad::Ready(ClipHandle(self.next_handle))
        } else {
            ClipLoad::Failed("file not readable".to_string())
        }
    }

    fn completion_version(&self) -> u64 {
        0
    }
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs) -> Result<()> {
    let config = ModConfig::load_from(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let root = match args.root {
        Some(root) => root,
        None => default_mod_dir().context("Could not determine the platform data directory")?,
    };
    anyhow::ensure!(root.is_dir(), "{} is not a directory", root.display());

    println!("=== Dry-run resolution against {} ===", root.display());
    let files = DirectoryFileResolver::new(root);
    let mut loader = DryRunLoader::default();

    for (domain, settings) in [
        (Domain::Siren, &config.sirens),
        (Domain::Ambient, &config.ambience),
        (Domain::Transit, &config.transit),
    ] {
        resolve_domain(domain, settings, &files, &mut loader);
    }

    Ok(())
}

fn resolve_domain(
    domain: Domain,
    settings: &DomainSettings,
    files: &DirectoryFileResolver,
    loader: &mut DryRunLoader,
) {
    println!("[{domain}]");
    if !settings.enabled {
        println!("  disabled; every target stays at its engine baseline");
        return;
    }

    let mut targets: Vec<_> = settings.target_selections.keys().collect();
    targets.sort_by_key(|target| target.to_lowercase());
    if targets.is_empty() {
        println!("  no targets configured (run once in game to synchronize them)");
        return;
    }

    let mut cache = LoadCache::new();
    for target in targets {
        let selection = settings.selection_for(target);
        if selection.is_default() {
            println!("  {target}: engine default");
            continue;
        }
        let context = format!("{domain}:{target}");
        match resolve_selection(
            domain, &selection, settings, files, loader, &mut cache, &context,
        ) {
            Resolution::Custom { path, .. } => {
                println!("  {target}: '{selection}' -> {}", path.display());
            }
            Resolution::Mute => {
                println!("  {target}: '{selection}' failed -> muted");
            }
            Resolution::Baseline => {
                println!("  {target}: '{selection}' failed -> engine default");
            }
        }
    }

    for (key, err) in cache.failures() {
        println!("  failure for '{key}': {err}");
    }
}
