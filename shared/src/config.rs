//! Per-domain configuration document and JSON persistence.
//!
//! The document has one section per audio domain (sirens, ambience, transit
//! announcements) and is stored as `klaxon.json` in the platform-specific
//! config directory. Loading degrades to defaults when the file is missing
//! or unparsable; parse errors are surfaced only through `load_from`, which
//! the diagnostics tooling uses.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::ProfileStore;
use crate::selection::SelectionKey;

/// Config document file name within the config directory.
pub const CONFIG_FILE: &str = "klaxon.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Secondary behavior when a configured selection fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FallbackPolicy {
    /// Fall back to the engine's own audio.
    #[default]
    UseDefault,
    /// Silence the target while the selection is broken.
    Mute,
    /// Try the single configured alternate selection, then the engine audio.
    AlternateCustom,
}

/// Settings for one audio domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSettings {
    /// Whether custom audio is applied for this domain (default: true).
    /// Disabling fully reverts every target to its engine baseline.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Folder under the mod directory holding this domain's custom files.
    #[serde(default)]
    pub custom_folder: String,
    /// What to do when a configured selection fails to resolve.
    #[serde(default)]
    pub fallback: FallbackPolicy,
    /// Alternate selection tried under `FallbackPolicy::AlternateCustom`.
    #[serde(default)]
    pub alternate_selection: SelectionKey,
    /// Configured selection per target id (`"Default"` means engine audio).
    #[serde(default)]
    pub target_selections: HashMap<String, SelectionKey>,
    /// Profiles for this domain's discovered custom files.
    #[serde(default)]
    pub custom_profiles: ProfileStore,
}

fn default_true() -> bool {
    true
}

impl Default for DomainSettings {
    fn default() -> Self {
        Self::with_folder("")
    }
}

impl DomainSettings {
    /// Default settings pointing at the given custom-file folder.
    pub fn with_folder(folder: impl Into<String>) -> Self {
        Self {
            enabled: true,
            custom_folder: folder.into(),
            fallback: FallbackPolicy::default(),
            alternate_selection: SelectionKey::default_sentinel(),
            target_selections: HashMap::new(),
            custom_profiles: ProfileStore::new(),
        }
    }

    /// Configured selection for a target id.
    ///
    /// Priority: exact match, then case-insensitive match. Targets without
    /// an entry use the `Default` sentinel.
    pub fn selection_for(&self, target_id: &str) -> SelectionKey {
        if let Some(selection) = self.target_selections.get(target_id) {
            return selection.clone();
        }
        self.target_selections
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(target_id))
            .map(|(_, selection)| selection.clone())
            .unwrap_or_default()
    }

    /// Set the selection for a target id, replacing a case-insensitive match
    /// in place so the map never holds two entries for one target.
    pub fn set_selection(&mut self, target_id: &str, selection: SelectionKey) {
        if !self.target_selections.contains_key(target_id)
            && let Some(existing) = self
                .target_selections
                .keys()
                .find(|id| id.eq_ignore_ascii_case(target_id))
                .cloned()
        {
            self.target_selections.remove(&existing);
        }
        self.target_selections
            .insert(target_id.to_string(), selection);
    }

    /// Ensure every known target id has an entry; missing ones become
    /// `Default`. Stale entries are left alone; pruning belongs to the
    /// catalog sync step, not the resolver.
    pub fn synchronize_targets<I, S>(&mut self, target_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in target_ids {
            let id = id.as_ref();
            let known = self.target_selections.contains_key(id)
                || self
                    .target_selections
                    .keys()
                    .any(|existing| existing.eq_ignore_ascii_case(id));
            if !known {
                self.target_selections
                    .insert(id.to_string(), SelectionKey::default_sentinel());
            }
        }
    }
}

/// The persisted configuration document, one section per audio domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModConfig {
    #[serde(default = "default_sirens")]
    pub sirens: DomainSettings,
    #[serde(default = "default_ambience")]
    pub ambience: DomainSettings,
    #[serde(default = "default_transit")]
    pub transit: DomainSettings,
}

fn default_sirens() -> DomainSettings {
    DomainSettings::with_folder("Sirens")
}
fn default_ambience() -> DomainSettings {
    DomainSettings::with_folder("Ambience")
}
fn default_transit() -> DomainSettings {
    DomainSettings::with_folder("Transit")
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            sirens: default_sirens(),
            ambience: default_ambience(),
            transit: default_transit(),
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.klaxonmod", "", "Klaxon")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

impl ModConfig {
    /// Loads the configuration from the platform config directory.
    ///
    /// Returns default values if the file doesn't exist or cannot be parsed.
    pub fn load() -> Self {
        config_dir()
            .and_then(|dir| std::fs::read_to_string(dir.join(CONFIG_FILE)).ok())
            .and_then(|content| serde_json::from_str::<Self>(&content).ok())
            .unwrap_or_default()
            .with_folder_defaults()
    }

    /// Loads the configuration from an explicit path, surfacing errors.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config.with_folder_defaults())
    }

    /// A partial document can leave a section's folder empty; empty means
    /// "use the stock folder name", filled in here after deserialization.
    fn with_folder_defaults(mut self) -> Self {
        if self.sirens.custom_folder.is_empty() {
            self.sirens.custom_folder = default_sirens().custom_folder;
        }
        if self.ambience.custom_folder.is_empty() {
            self.ambience.custom_folder = default_ambience().custom_folder;
        }
        if self.transit.custom_folder.is_empty() {
            self.transit.custom_folder = default_transit().custom_folder;
        }
        self
    }

    /// Saves the configuration to the platform config directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(dir) = config_dir() {
            std::fs::create_dir_all(&dir)?;
            self.save_to(&dir.join(CONFIG_FILE))?;
        }
        Ok(())
    }

    /// Saves the configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
