//! Shared test collaborators for unit and integration tests.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use hashbrown::{HashMap, HashSet};

use klaxon_shared::{AudioProfile, SelectionKey};

use crate::domain::{Domain, TargetKey};
use crate::host::{AudioHost, ClipHandle, ClipLoad, ClipLoader, FileResolver, HostAudioSource};

// ============================================================================
// Test Host
// ============================================================================

/// Recording host: serves registered sources and tracks what gets applied.
#[derive(Default)]
pub struct TestHost {
    sources: Vec<(Domain, HostAudioSource)>,
    applied: Vec<(TargetKey, ClipHandle, AudioProfile)>,
    live: HashMap<TargetKey, (ClipHandle, AudioProfile)>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, domain: Domain, source: HostAudioSource) {
        self.sources.push((domain, source));
    }

    /// Every apply call in order, including baseline restores.
    pub fn applied(&self) -> &[(TargetKey, ClipHandle, AudioProfile)] {
        &self.applied
    }

    /// The clip currently applied to a target.
    pub fn live_clip(&self, key: &TargetKey) -> Option<ClipHandle> {
        self.live.get(key).map(|(clip, _)| *clip)
    }

    /// The profile currently applied to a target.
    pub fn live_profile(&self, key: &TargetKey) -> Option<&AudioProfile> {
        self.live.get(key).map(|(_, profile)| profile)
    }
}

impl AudioHost for TestHost {
    fn audio_sources(&mut self, domain: Domain) -> Vec<HostAudioSource> {
        self.sources
            .iter()
            .filter(|(d, _)| *d == domain)
            .map(|(_, source)| source.clone())
            .collect()
    }

    fn apply(&mut self, target: &TargetKey, clip: ClipHandle, profile: &AudioProfile) {
        self.applied.push((target.clone(), clip, profile.clone()));
        self.live.insert(target.clone(), (clip, profile.clone()));
    }
}

/// A transit-announcement source with no vehicle tagging.
pub fn transit_source(name: &str, clip: u32) -> HostAudioSource {
    HostAudioSource {
        prefab_name: name.to_string(),
        mixer_group: "announcements".to_string(),
        vehicle: None,
        clip: ClipHandle(clip),
        profile: AudioProfile::default(),
    }
}

// ============================================================================
// Test Loader
// ============================================================================

/// Scripted clip loader with controllable pending loads.
#[derive(Default)]
pub struct TestLoader {
    ready_clips: HashMap<PathBuf, ClipHandle>,
    pending_paths: HashSet<PathBuf>,
    failing_paths: HashMap<PathBuf, String>,
    version: u64,
    load_calls: Vec<PathBuf>,
}

impl TestLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&mut self, path: &str, clip: ClipHandle) {
        self.ready_clips.insert(PathBuf::from(path), clip);
    }

    pub fn pending(&mut self, path: &str) {
        self.pending_paths.insert(PathBuf::from(path));
    }

    pub fn failing(&mut self, path: &str, reason: &str) {
        self.failing_paths
            .insert(PathBuf::from(path), reason.to_string());
    }

    /// Finish a pending load, bumping the completion version.
    pub fn complete(&mut self, path: &str, clip: ClipHandle) {
        let path = PathBuf::from(path);
        self.pending_paths.remove(&path);
        self.ready_clips.insert(path, clip);
        self.version += 1;
    }

    /// Every load request in order, duplicates included.
    pub fn load_calls(&self) -> &[PathBuf] {
        &self.load_calls
    }
}

impl ClipLoader for TestLoader {
    fn load(&mut self, path: &Path) -> ClipLoad {
        self.load_calls.push(path.to_path_buf());
        if self.pending_paths.contains(path) {
            ClipLoad::Pending
        } else if let Some(clip) = self.ready_clips.get(path) {
            ClipLoad::Ready(*clip)
        } else if let Some(reason) = self.failing_paths.get(path) {
            ClipLoad::Failed(reason.clone())
        } else {
            ClipLoad::Failed("no clip registered for path".to_string())
        }
    }

    fn completion_version(&self) -> u64 {
        self.version
    }
}

// ============================================================================
// Test File Resolver
// ============================================================================

/// Maps normalized selection keys straight to paths, counting calls.
#[derive(Default)]
pub struct TestFiles {
    paths: HashMap<String, PathBuf>,
    resolve_calls: Cell<usize>,
}

impl TestFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&mut self, key: &str, path: &str) {
        self.paths
            .insert(SelectionKey::new(key).normalized(), PathBuf::from(path));
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.get()
    }
}

impl FileResolver for TestFiles {
    fn resolve_path(&self, _domain: Domain, _folder: &str, key: &SelectionKey) -> Option<PathBuf> {
        self.resolve_calls.set(self.resolve_calls.get() + 1);
        self.paths.get(&key.normalized()).cloned()
    }
}
