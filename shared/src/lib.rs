//! Klaxon shared types.
//!
//! Serialized value types shared between the engine and tooling: audio
//! parameter profiles, selection keys, and the per-domain configuration
//! document.

pub mod config;
pub mod profile;
pub mod selection;

pub use config::{ConfigError, DomainSettings, FallbackPolicy, ModConfig};
pub use profile::{AudioProfile, PROFILE_EPSILON, ProfileStore, RolloffMode};
pub use selection::{DEFAULT_SELECTION, SelectionKey};
