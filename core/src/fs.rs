//! Mod-folder file resolution and scanning.
//!
//! Custom audio files live under `<mod dir>/<domain folder>/` and are
//! addressed by file stem, case-insensitively. Unsupported extensions and
//! unreadable entries are silently skipped, matching how the rest of the
//! engine treats invalid catalog data.

use std::path::{Path, PathBuf};

use klaxon_shared::SelectionKey;

use crate::domain::Domain;
use crate::host::FileResolver;

/// Audio file extensions the loader understands.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3"];

/// Trait for providing the mod's root audio directory.
///
/// The host integration supplies its own implementation (the game's mod
/// folder); tests point it at a temp directory.
pub trait ModDirProvider: Send + Sync {
    /// Returns the root directory holding the per-domain custom folders.
    ///
    /// Returns `None` if the location cannot be determined.
    fn mod_dir(&self) -> Option<PathBuf>;
}

/// Returns the platform-specific default mod audio directory.
///
/// Returns `None` if the home directory cannot be determined.
pub fn default_mod_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.klaxonmod", "", "Klaxon")
        .map(|dirs| dirs.data_dir().join("audio"))
}

/// Resolves selection keys to audio files under `<root>/<folder>/`.
pub struct DirectoryFileResolver {
    root: PathBuf,
}

impl DirectoryFileResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build a resolver rooted at the provider's mod directory.
    ///
    /// Returns `None` when the provider cannot determine a location.
    pub fn from_provider(provider: &dyn ModDirProvider) -> Option<Self> {
        provider.mod_dir().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileResolver for DirectoryFileResolver {
    fn resolve_path(&self, _domain: Domain, folder: &str, key: &SelectionKey) -> Option<PathBuf> {
        let dir = self.root.join(folder);
        let entries = std::fs::read_dir(&dir).ok()?;
        let wanted = key.normalized();

        let mut matches: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        AUDIO_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a))
                    })
            })
            .filter(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .is_some_and(|stem| stem.to_lowercase() == wanted)
            })
            .collect();

        // Multiple extensions for one stem: pick deterministically.
        matches.sort();
        matches.into_iter().next()
    }
}

/// Scan a domain folder into its candidate selection keys.
///
/// Returns the file stems of supported audio files, deduplicated
/// case-insensitively (first casing wins) and sorted case-insensitively.
pub fn scan_selection_keys(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return vec![];
    };

    let mut keys: Vec<String> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        })
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
        .collect();

    keys.sort_by_key(|key| key.to_lowercase());
    keys.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_resolve_matches_stem_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let sirens = dir.path().join("Sirens");
        std::fs::create_dir(&sirens).unwrap();
        touch(&sirens.join("Siren_A.ogg"));

        let resolver = DirectoryFileResolver::new(dir.path());
        let path = resolver.resolve_path(Domain::Siren, "Sirens", &SelectionKey::new("siren_a"));
        assert_eq!(path, Some(sirens.join("Siren_A.ogg")));
    }

    #[test]
    fn test_resolve_ignores_unsupported_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let sirens = dir.path().join("Sirens");
        std::fs::create_dir(&sirens).unwrap();
        touch(&sirens.join("siren_a.txt"));

        let resolver = DirectoryFileResolver::new(dir.path());
        assert_eq!(
            resolver.resolve_path(Domain::Siren, "Sirens", &SelectionKey::new("siren_a")),
            None
        );
    }

    #[test]
    fn test_resolve_missing_folder_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = DirectoryFileResolver::new(dir.path());
        assert_eq!(
            resolver.resolve_path(Domain::Siren, "Sirens", &SelectionKey::new("siren_a")),
            None
        );
    }

    #[test]
    fn test_resolve_is_deterministic_for_duplicate_stems() {
        let dir = tempfile::tempdir().unwrap();
        let sirens = dir.path().join("Sirens");
        std::fs::create_dir(&sirens).unwrap();
        touch(&sirens.join("siren_a.wav"));
        touch(&sirens.join("siren_a.ogg"));

        let resolver = DirectoryFileResolver::new(dir.path());
        let first = resolver.resolve_path(Domain::Siren, "Sirens", &SelectionKey::new("siren_a"));
        let second = resolver.resolve_path(Domain::Siren, "Sirens", &SelectionKey::new("siren_a"));
        assert_eq!(first, second);
        assert_eq!(first, Some(sirens.join("siren_a.ogg")));
    }

    #[test]
    fn test_scan_dedups_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Siren_B.ogg"));
        touch(&dir.path().join("siren_a.wav"));
        touch(&dir.path().join("SIREN_A.mp3"));
        touch(&dir.path().join("readme.txt"));

        let keys = scan_selection_keys(dir.path());
        assert_eq!(keys.len(), 2);
        assert!(keys[0].eq_ignore_ascii_case("siren_a"));
        assert!(keys[1].eq_ignore_ascii_case("siren_b"));
    }

    #[test]
    fn test_resolver_from_provider() {
        struct FixedDir(PathBuf);
        impl ModDirProvider for FixedDir {
            fn mod_dir(&self) -> Option<PathBuf> {
                Some(self.0.clone())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let sirens = dir.path().join("Sirens");
        std::fs::create_dir(&sirens).unwrap();
        touch(&sirens.join("siren_a.ogg"));

        let provider = FixedDir(dir.path().to_path_buf());
        let resolver = DirectoryFileResolver::from_provider(&provider).unwrap();
        assert_eq!(resolver.root(), dir.path());
        assert!(
            resolver
                .resolve_path(Domain::Siren, "Sirens", &SelectionKey::new("siren_a"))
                .is_some()
        );
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_selection_keys(&dir.path().join("nope")).is_empty());
    }
}
