//! Boundary contracts implemented outside the engine.
//!
//! The host game supplies discoverable audio sources and receives applied
//! clip/profile pairs; the platform layer supplies clip loading and file
//! resolution. The engine itself never touches the audio pipeline or the
//! filesystem except through these traits, which keeps every apply pass
//! testable with the no-op collaborators in `test_utils`.

use std::path::{Path, PathBuf};

use klaxon_shared::{AudioProfile, SelectionKey};

use crate::domain::{Domain, Region, TargetKey, VehicleType};

/// Opaque handle to an engine-side audio clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(pub u32);

/// A live audio source offered by the host for target discovery.
#[derive(Debug, Clone)]
pub struct HostAudioSource {
    /// Prefab name as the host reports it.
    pub prefab_name: String,
    /// Audio-mixer group the source is routed through.
    pub mixer_group: String,
    /// Service type and region, present on emergency-vehicle prefabs.
    pub vehicle: Option<(VehicleType, Region)>,
    /// The source's current clip (the baseline when first observed).
    pub clip: ClipHandle,
    /// The source's current parameters (the baseline when first observed).
    pub profile: AudioProfile,
}

/// Host-side surface the apply drivers talk to.
pub trait AudioHost {
    /// Live audio sources eligible for the given domain's target scan.
    ///
    /// Called once per `BuildingTargets` phase (and again on every retry
    /// while the scan comes up empty).
    fn audio_sources(&mut self, domain: Domain) -> Vec<HostAudioSource>;

    /// Apply a clip and parameter profile to a live target.
    ///
    /// Restoring a baseline and applying a custom selection go through the
    /// same call; the host must not fail it.
    fn apply(&mut self, target: &TargetKey, clip: ClipHandle, profile: &AudioProfile);
}

/// Outcome of a single clip-load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipLoad {
    /// The clip is decoded and ready to apply.
    Ready(ClipHandle),
    /// The load is in flight; retry after `completion_version` bumps.
    Pending,
    /// The load failed with a human-readable reason.
    Failed(String),
}

/// Asynchronous clip loader, observed by polling.
///
/// The engine never registers completion callbacks: a pass that hits a
/// pending load leaves the target at baseline and re-resolves once the
/// completion version has moved.
pub trait ClipLoader {
    /// Request (or re-request) the clip at `path`.
    fn load(&mut self, path: &Path) -> ClipLoad;

    /// Pump in-flight loads. Called once per engine tick.
    fn poll_async(&mut self) {}

    /// Monotonic counter, bumped whenever any pending load completes.
    fn completion_version(&self) -> u64;
}

/// Maps a selection key to an audio file within a domain's custom folder.
pub trait FileResolver {
    fn resolve_path(&self, domain: Domain, folder: &str, key: &SelectionKey) -> Option<PathBuf>;
}
