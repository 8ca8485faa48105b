//! Baseline snapshots of each target's original clip and parameters.
//!
//! Captured the first time a target is observed in a session and used to
//! restore state before every re-apply pass. Owned by the apply driver;
//! lifetime is one load session.

use hashbrown::HashMap;

use klaxon_shared::AudioProfile;

use crate::domain::TargetKey;
use crate::host::ClipHandle;

/// A target's original clip and parameters.
#[derive(Debug, Clone)]
pub(crate) struct BaselineSnapshot {
    pub clip: ClipHandle,
    pub profile: AudioProfile,
}

/// Per-target baselines, captured once per session.
#[derive(Debug, Default)]
pub(crate) struct BaselineCache {
    snapshots: HashMap<TargetKey, BaselineSnapshot>,
}

impl BaselineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a target's baseline. The first observation wins; later calls
    /// for the same target are ignored so a re-scan never captures an
    /// already-overridden state as the baseline.
    pub fn capture(&mut self, key: &TargetKey, clip: ClipHandle, profile: AudioProfile) -> bool {
        if self.snapshots.contains_key(key) {
            return false;
        }
        self.snapshots
            .insert(key.clone(), BaselineSnapshot { clip, profile });
        true
    }

    pub fn get(&self, key: &TargetKey) -> Option<&BaselineSnapshot> {
        self.snapshots.get(key)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
