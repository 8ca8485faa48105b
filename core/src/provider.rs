//! Per-domain target discovery.
//!
//! Each domain filters the host's audio sources with its own heuristic but
//! shares the generic apply driver. Sources that match no heuristic are
//! silently skipped; a source observed twice keeps its first baseline.

use hashbrown::HashSet;

use klaxon_shared::AudioProfile;

use crate::domain::{Domain, TargetKey, TransitSlot};
use crate::host::{AudioHost, ClipHandle};

/// A target found during the `BuildingTargets` scan, with its baseline.
#[derive(Debug, Clone)]
pub struct DiscoveredTarget {
    pub key: TargetKey,
    pub clip: ClipHandle,
    pub profile: AudioProfile,
}

/// Domain-specific target discovery composed with the generic driver.
pub trait TargetProvider {
    fn domain(&self) -> Domain;

    /// Scan host-provided audio sources into this domain's target set.
    fn discover(&self, host: &mut dyn AudioHost) -> Vec<DiscoveredTarget>;
}

/// Prefab-name fragment marking a siren source.
const SIREN_NAME_HINT: &str = "siren";

/// Mixer groups whose members count as ambient loops.
const AMBIENT_MIXER_GROUPS: &[&str] = &["ambience", "world", "nature"];

/// Prefab-name fragments that mark an ambient loop.
const AMBIENT_NAME_HINTS: &[&str] = &["ambience", "ambient", "wind", "forest", "birds", "rain"];

/// Emergency-vehicle sirens: one target per service type and region pair,
/// plus a per-prefab override target for siren-named prefabs.
pub struct SirenTargets;

impl TargetProvider for SirenTargets {
    fn domain(&self) -> Domain {
        Domain::Siren
    }

    fn discover(&self, host: &mut dyn AudioHost) -> Vec<DiscoveredTarget> {
        let mut targets = Vec::new();
        let mut seen: HashSet<TargetKey> = HashSet::new();

        for source in host.audio_sources(Domain::Siren) {
            if let Some((vehicle, region)) = source.vehicle {
                let key = TargetKey::Vehicle(vehicle, region);
                if seen.insert(key.clone()) {
                    targets.push(DiscoveredTarget {
                        key,
                        clip: source.clip,
                        profile: source.profile.clone(),
                    });
                }
            }
            if source.prefab_name.to_lowercase().contains(SIREN_NAME_HINT) {
                let key = TargetKey::VehiclePrefab(source.prefab_name.clone());
                if seen.insert(key.clone()) {
                    targets.push(DiscoveredTarget {
                        key,
                        clip: source.clip,
                        profile: source.profile,
                    });
                }
            }
        }

        targets
    }
}

/// Ambient loops: sources routed through an allow-listed mixer group or
/// whose prefab name contains an ambient keyword.
pub struct AmbientTargets;

impl TargetProvider for AmbientTargets {
    fn domain(&self) -> Domain {
        Domain::Ambient
    }

    fn discover(&self, host: &mut dyn AudioHost) -> Vec<DiscoveredTarget> {
        let mut targets = Vec::new();
        let mut seen: HashSet<TargetKey> = HashSet::new();

        for source in host.audio_sources(Domain::Ambient) {
            let group = source.mixer_group.to_lowercase();
            let name = source.prefab_name.to_lowercase();
            let eligible = AMBIENT_MIXER_GROUPS.contains(&group.as_str())
                || AMBIENT_NAME_HINTS.iter().any(|hint| name.contains(hint));
            if !eligible {
                continue;
            }
            let key = TargetKey::AmbientPrefab(source.prefab_name.clone());
            if seen.insert(key.clone()) {
                targets.push(DiscoveredTarget {
                    key,
                    clip: source.clip,
                    profile: source.profile,
                });
            }
        }

        targets
    }
}

/// Transit announcements: the fixed eight slots, each taking its baseline
/// from the first host source matching the slot's keywords. No heuristic
/// scan beyond that matching.
pub struct TransitTargets;

impl TargetProvider for TransitTargets {
    fn domain(&self) -> Domain {
        Domain::Transit
    }

    fn discover(&self, host: &mut dyn AudioHost) -> Vec<DiscoveredTarget> {
        let sources = host.audio_sources(Domain::Transit);
        let mut targets = Vec::new();

        for slot in TransitSlot::ALL {
            if let Some(source) = sources
                .iter()
                .find(|s| slot.matches_source(&s.prefab_name))
            {
                targets.push(DiscoveredTarget {
                    key: TargetKey::Transit(slot),
                    clip: source.clip,
                    profile: source.profile.clone(),
                });
            }
        }

        targets
    }
}
