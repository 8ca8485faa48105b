//! Audio parameter profiles and the per-domain profile catalog.
//!
//! Every profile handed to an apply step has already been clamped into the
//! documented ranges; clamping is idempotent, so re-clamping a stored profile
//! is always safe.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::selection::SelectionKey;

/// Tolerance for float comparison of profile fields.
pub const PROFILE_EPSILON: f32 = 1e-4;

/// Separation kept between min and max distance after clamping.
const DISTANCE_GAP: f32 = 0.01;

/// Volume rolloff curve over distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RolloffMode {
    /// Logarithmic attenuation (engine default for world sounds)
    #[default]
    Logarithmic,
    /// Linear attenuation between min and max distance
    Linear,
    /// Host-defined attenuation curve
    Custom,
}

/// Playback parameters applied to a live audio target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioProfile {
    /// Playback volume (default: 1.0, range: 0.0-1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Playback pitch multiplier (default: 1.0, range: -3.0-3.0)
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    /// 2D/3D blend, 1.0 is fully spatialized (default: 1.0, range: 0.0-1.0)
    #[serde(default = "default_spatial_blend")]
    pub spatial_blend: f32,
    /// Doppler effect strength (default: 1.0, range: 0.0-1.0)
    #[serde(default = "default_doppler")]
    pub doppler_level: f32,
    /// Stereo spread angle in degrees (default: 0.0, range: 0.0-360.0)
    #[serde(default)]
    pub spread: f32,
    /// Distance at which attenuation starts (default: 1.0, >= 0.0)
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    /// Distance at which attenuation ends (default: 500.0, > min_distance)
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    /// Whether the clip loops (default: true, sirens and ambience loop)
    #[serde(default = "default_true")]
    pub loop_clip: bool,
    /// Attenuation curve (default: Logarithmic)
    #[serde(default)]
    pub rolloff: RolloffMode,
    /// Fade-in duration in seconds (default: 0.0, >= 0.0)
    #[serde(default)]
    pub fade_in_seconds: f32,
    /// Fade-out duration in seconds (default: 0.0, >= 0.0)
    #[serde(default)]
    pub fade_out_seconds: f32,
    /// Start playback at a random offset into the clip (default: false)
    #[serde(default)]
    pub random_start_time: bool,
}

fn default_volume() -> f32 {
    1.0
}
fn default_pitch() -> f32 {
    1.0
}
fn default_spatial_blend() -> f32 {
    1.0
}
fn default_doppler() -> f32 {
    1.0
}
fn default_min_distance() -> f32 {
    1.0
}
fn default_max_distance() -> f32 {
    500.0
}
fn default_true() -> bool {
    true
}

impl Default for AudioProfile {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            pitch: default_pitch(),
            spatial_blend: default_spatial_blend(),
            doppler_level: default_doppler(),
            spread: 0.0,
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            loop_clip: default_true(),
            rolloff: RolloffMode::default(),
            fade_in_seconds: 0.0,
            fade_out_seconds: 0.0,
            random_start_time: false,
        }
    }
}

impl AudioProfile {
    /// Returns a copy with every field forced into its documented range.
    ///
    /// Pure and idempotent: `p.clamped().clamped() == p.clamped()`.
    pub fn clamped(&self) -> Self {
        let min_distance = self.min_distance.max(0.0);
        Self {
            volume: self.volume.clamp(0.0, 1.0),
            pitch: self.pitch.clamp(-3.0, 3.0),
            spatial_blend: self.spatial_blend.clamp(0.0, 1.0),
            doppler_level: self.doppler_level.clamp(0.0, 1.0),
            spread: self.spread.clamp(0.0, 360.0),
            min_distance,
            max_distance: self.max_distance.max(min_distance + DISTANCE_GAP),
            loop_clip: self.loop_clip,
            rolloff: self.rolloff,
            fade_in_seconds: self.fade_in_seconds.max(0.0),
            fade_out_seconds: self.fade_out_seconds.max(0.0),
            random_start_time: self.random_start_time,
        }
    }

    /// Returns a silenced copy; every other field keeps its value.
    pub fn muted(&self) -> Self {
        Self {
            volume: 0.0,
            ..self.clone()
        }
    }

    /// Epsilon-tolerant equality on float fields, exact elsewhere.
    pub fn approx_eq(&self, other: &Self) -> bool {
        fn close(a: f32, b: f32) -> bool {
            (a - b).abs() <= PROFILE_EPSILON
        }
        close(self.volume, other.volume)
            && close(self.pitch, other.pitch)
            && close(self.spatial_blend, other.spatial_blend)
            && close(self.doppler_level, other.doppler_level)
            && close(self.spread, other.spread)
            && close(self.min_distance, other.min_distance)
            && close(self.max_distance, other.max_distance)
            && close(self.fade_in_seconds, other.fade_in_seconds)
            && close(self.fade_out_seconds, other.fade_out_seconds)
            && self.loop_clip == other.loop_clip
            && self.rolloff == other.rolloff
            && self.random_start_time == other.random_start_time
    }
}

/// Named audio profiles associated with a domain's discovered custom files.
///
/// Lookups fold case via `SelectionKey`; `get` hands out clamped copies and
/// never mutates the stored profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileStore {
    profiles: HashMap<SelectionKey, AudioProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: SelectionKey, profile: AudioProfile) {
        self.profiles.insert(key, profile);
    }

    /// Case-insensitive lookup returning a clamped copy.
    pub fn get(&self, key: &SelectionKey) -> Option<AudioProfile> {
        self.profiles.get(key).map(AudioProfile::clamped)
    }

    pub fn contains(&self, key: &SelectionKey) -> bool {
        self.profiles.contains_key(key)
    }

    pub fn remove(&mut self, key: &SelectionKey) -> Option<AudioProfile> {
        self.profiles.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SelectionKey> {
        self.profiles.keys()
    }

    /// Stored entries as persisted, without clamping. Diagnostics only;
    /// resolution goes through `get`.
    pub fn iter(&self) -> impl Iterator<Item = (&SelectionKey, &AudioProfile)> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Engine-baseline-safe parameters used when no profile applies.
    pub fn fallback() -> AudioProfile {
        AudioProfile::default()
    }

    /// Seed default profiles for file keys discovered by a folder scan.
    ///
    /// Existing entries keep their profile; the `Default` sentinel and empty
    /// keys are ignored. Returns the number of profiles added.
    pub fn register_discovered<I, S>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for raw in keys {
            let key = SelectionKey::new(raw);
            if key.is_empty() || key.is_default() || self.profiles.contains_key(&key) {
                continue;
            }
            self.profiles.insert(key, AudioProfile::default());
            added += 1;
        }
        added
    }
}
