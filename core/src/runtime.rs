//! Engine facade owning the per-domain drivers and the configuration.
//!
//! `ModRuntime` is the single object the host integration holds: it owns the
//! configuration document, the config-version counter the drivers watch, and
//! one apply driver per audio domain. The host forwards lifecycle signals
//! and calls `tick` once per frame with its collaborators; all mutation of
//! the configuration goes through the setters here so every change bumps the
//! version exactly once.

use tracing::info;

use klaxon_shared::{DomainSettings, FallbackPolicy, ModConfig, SelectionKey};

use crate::domain::Domain;
use crate::driver::{ApplyDriver, DriverState};
use crate::host::{AudioHost, ClipLoader, FileResolver};
use crate::provider::{AmbientTargets, SirenTargets, TargetProvider, TransitTargets};

/// The three-domain selection/apply engine.
pub struct ModRuntime {
    config: ModConfig,
    config_version: u64,
    sirens: ApplyDriver<SirenTargets>,
    ambience: ApplyDriver<AmbientTargets>,
    transit: ApplyDriver<TransitTargets>,
}

impl ModRuntime {
    /// Create a runtime with default configuration.
    pub fn new() -> Self {
        Self::with_config(ModConfig::default())
    }

    /// Create a runtime with a loaded configuration document.
    pub fn with_config(config: ModConfig) -> Self {
        Self {
            config,
            config_version: 0,
            sirens: ApplyDriver::new(SirenTargets),
            ambience: ApplyDriver::new(AmbientTargets),
            transit: ApplyDriver::new(TransitTargets),
        }
    }

    pub fn config(&self) -> &ModConfig {
        &self.config
    }

    /// Counter bumped by every configuration change; drivers compare it
    /// against their last applied pass.
    pub fn config_version(&self) -> u64 {
        self.config_version
    }

    pub fn domain_settings(&self, domain: Domain) -> &DomainSettings {
        match domain {
            Domain::Siren => &self.config.sirens,
            Domain::Ambient => &self.config.ambience,
            Domain::Transit => &self.config.transit,
        }
    }

    pub fn driver_state(&self, domain: Domain) -> DriverState {
        match domain {
            Domain::Siren => self.sirens.state(),
            Domain::Ambient => self.ambience.state(),
            Domain::Transit => self.transit.state(),
        }
    }

    /// Last apply-pass summary for a domain, for a diagnostics UI.
    pub fn last_status(&self, domain: Domain) -> Option<&str> {
        match domain {
            Domain::Siren => self.sirens.last_status(),
            Domain::Ambient => self.ambience.last_status(),
            Domain::Transit => self.transit.last_status(),
        }
    }

    fn domain_settings_mut(&mut self, domain: Domain) -> &mut DomainSettings {
        match domain {
            Domain::Siren => &mut self.config.sirens,
            Domain::Ambient => &mut self.config.ambience,
            Domain::Transit => &mut self.config.transit,
        }
    }

    fn bump_version(&mut self) {
        self.config_version += 1;
    }

    pub fn set_enabled(&mut self, domain: Domain, enabled: bool) {
        self.domain_settings_mut(domain).enabled = enabled;
        self.bump_version();
    }

    pub fn set_selection(&mut self, domain: Domain, target_id: &str, selection: SelectionKey) {
        self.domain_settings_mut(domain)
            .set_selection(target_id, selection);
        self.bump_version();
    }

    pub fn set_fallback(&mut self, domain: Domain, fallback: FallbackPolicy) {
        self.domain_settings_mut(domain).fallback = fallback;
        self.bump_version();
    }

    pub fn set_alternate(&mut self, domain: Domain, selection: SelectionKey) {
        self.domain_settings_mut(domain).alternate_selection = selection;
        self.bump_version();
    }

    /// Replace the whole document (e.g. after the options UI saves).
    pub fn replace_config(&mut self, config: ModConfig) {
        self.config = config;
        self.bump_version();
    }

    /// The custom-file catalog changed on disk (rescan, file added or
    /// removed). Invalidates the resolution state so the next tick
    /// re-resolves everything; a selection fixed on disk self-heals here.
    pub fn notify_catalog_changed(&mut self) {
        self.bump_version();
    }

    /// Host world finished loading; drivers start discovering targets.
    pub fn on_world_loaded(&mut self) {
        info!("world loaded, audio override engine starting");
        self.sirens.on_session_start();
        self.ambience.on_session_start();
        self.transit.on_session_start();
    }

    /// Host world is unloading; all per-session state is dropped.
    pub fn on_world_unloaded(&mut self) {
        info!("world unloaded, audio override engine reset");
        self.sirens.on_session_end();
        self.ambience.on_session_end();
        self.transit.on_session_end();
    }

    /// Per-frame tick: pump the loader once, then tick each domain driver.
    ///
    /// When a driver finishes its first target scan, the discovered target
    /// ids are synchronized into that domain's selection map (missing ones
    /// become `Default`); that bookkeeping does not bump the config version
    /// because it changes no resolution outcome.
    pub fn tick(
        &mut self,
        host: &mut dyn AudioHost,
        files: &dyn FileResolver,
        loader: &mut dyn ClipLoader,
    ) {
        loader.poll_async();
        tick_domain(
            &mut self.sirens,
            &mut self.config.sirens,
            self.config_version,
            host,
            files,
            loader,
        );
        tick_domain(
            &mut self.ambience,
            &mut self.config.ambience,
            self.config_version,
            host,
            files,
            loader,
        );
        tick_domain(
            &mut self.transit,
            &mut self.config.transit,
            self.config_version,
            host,
            files,
            loader,
        );
    }
}

impl Default for ModRuntime {
    fn default() -> Self {
        Self::new()
    }
}

fn tick_domain<P: TargetProvider>(
    driver: &mut ApplyDriver<P>,
    settings: &mut DomainSettings,
    config_version: u64,
    host: &mut dyn AudioHost,
    files: &dyn FileResolver,
    loader: &mut dyn ClipLoader,
) {
    let was_ready = driver.state() == DriverState::Ready;
    driver.tick(host, settings, config_version, files, loader);
    if !was_ready && driver.state() == DriverState::Ready {
        settings.synchronize_targets(driver.targets().iter().map(|key| key.id()));
    }
}
