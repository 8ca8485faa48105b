//! Klaxon Core - Audio override engine
//!
//! This crate drives the replacement of game audio with user-supplied clips
//! across the siren, ambience, and transit domains.
//!
//! # Architecture
//!
//! - [`ModRuntime`] - Top-level state ticked once per frame by the host shim
//! - [`ApplyDriver`] - Per-domain state machine from session start to applied audio
//! - [`TargetProvider`] - Discovers overridable targets among the host's sources
//! - [`AudioHost`] / [`ClipLoader`] / [`FileResolver`] - Seams to the game engine

mod baseline;
pub mod domain;
pub mod driver;
pub mod fs;
pub mod host;
#[cfg(test)]
mod integration;
pub mod provider;
pub mod resolve;
pub mod runtime;
pub mod similar;
#[cfg(test)]
pub mod test_utils;

// Re-export core traits and types
pub use domain::{Domain, Region, TargetKey, TransitSlot, VehicleType};
pub use driver::{ApplyDriver, DriverState};
pub use host::{AudioHost, ClipHandle, ClipLoad, ClipLoader, FileResolver, HostAudioSource};
pub use provider::{AmbientTargets, DiscoveredTarget, SirenTargets, TargetProvider, TransitTargets};
pub use resolve::{LoadCache, Resolution, ResolveError, resolve_selection};
pub use runtime::ModRuntime;

// Re-export filesystem helpers
pub use fs::{
    AUDIO_EXTENSIONS, DirectoryFileResolver, ModDirProvider, default_mod_dir, scan_selection_keys,
};

// Re-export shared configuration types for convenience
pub use klaxon_shared::{
    AudioProfile, ConfigError, DomainSettings, FallbackPolicy, ModConfig, PROFILE_EPSILON,
    ProfileStore, RolloffMode, SelectionKey,
};

pub use similar::find_similar;
