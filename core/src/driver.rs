//! Generic per-domain apply driver.
//!
//! One driver runs per audio domain, composed with that domain's
//! [`TargetProvider`]. The driver walks a small state machine driven by the
//! host lifecycle and a per-frame tick:
//!
//! - `AwaitingSession`: the host world is not ready; ticks are no-ops.
//! - `BuildingTargets`: one-shot scan of host sources into the target set
//!   and baseline snapshots, retried every tick while it comes up empty.
//! - `Ready`: normal operation. A pass runs only when the config version or
//!   the loader's completion version moved since the last applied pass;
//!   otherwise the tick is an O(1) skip.
//!
//! Every pass restores all targets to their baselines first, then resolves
//! and applies each target in a stable case-insensitive order, so a pass
//! never observes leftovers from the previous one and re-running with
//! unchanged inputs is a guaranteed no-op.

use tracing::{info, warn};

use klaxon_shared::DomainSettings;

use crate::baseline::BaselineCache;
use crate::domain::{Domain, TargetKey};
use crate::host::{AudioHost, ClipLoader, FileResolver};
use crate::provider::TargetProvider;
use crate::resolve::{LoadCache, Resolution, resolve_selection};

/// Driver lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    AwaitingSession,
    BuildingTargets,
    Ready,
}

/// Versions observed when a pass last ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AppliedVersions {
    config: u64,
    loads: u64,
}

/// Applies one domain's configuration to its live targets.
pub struct ApplyDriver<P: TargetProvider> {
    provider: P,
    state: DriverState,
    targets: Vec<TargetKey>,
    baselines: BaselineCache,
    last_applied: Option<AppliedVersions>,
    last_status: Option<String>,
    reported_empty: bool,
}

impl<P: TargetProvider> ApplyDriver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: DriverState::AwaitingSession,
            targets: Vec::new(),
            baselines: BaselineCache::new(),
            last_applied: None,
            last_status: None,
            reported_empty: false,
        }
    }

    pub fn domain(&self) -> Domain {
        self.provider.domain()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Discovered targets in apply order. Empty until `Ready`.
    pub fn targets(&self) -> &[TargetKey] {
        &self.targets
    }

    /// Human-readable summary of the last apply pass, for a diagnostics UI.
    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    /// Host world became ready; start discovering targets.
    pub fn on_session_start(&mut self) {
        if self.state == DriverState::AwaitingSession {
            info!("{}: session started, scanning for audio targets", self.domain());
            self.state = DriverState::BuildingTargets;
        }
    }

    /// Host world is going away; drop targets, baselines, and pass history.
    pub fn on_session_end(&mut self) {
        self.targets.clear();
        self.baselines.clear();
        self.last_applied = None;
        self.last_status = None;
        self.reported_empty = false;
        self.state = DriverState::AwaitingSession;
    }

    /// Per-frame tick. Builds targets if needed, then runs an apply pass
    /// when the config or load version moved.
    pub fn tick(
        &mut self,
        host: &mut dyn AudioHost,
        settings: &DomainSettings,
        config_version: u64,
        files: &dyn FileResolver,
        loader: &mut dyn ClipLoader,
    ) {
        match self.state {
            DriverState::AwaitingSession => return,
            DriverState::BuildingTargets => {
                if !self.build_targets(host) {
                    return;
                }
            }
            DriverState::Ready => {}
        }
        self.apply_pass(host, settings, config_version, files, loader);
    }

    /// One-shot target scan. Returns false while no eligible target exists,
    /// leaving the driver in `BuildingTargets` to retry next tick.
    fn build_targets(&mut self, host: &mut dyn AudioHost) -> bool {
        let discovered = self.provider.discover(host);
        if discovered.is_empty() {
            if !self.reported_empty {
                warn!(
                    "{}: host provided no eligible audio targets; retrying",
                    self.domain()
                );
                self.reported_empty = true;
            }
            return false;
        }

        for target in &discovered {
            self.baselines
                .capture(&target.key, target.clip, target.profile.clone());
        }
        self.targets = discovered.into_iter().map(|t| t.key).collect();
        // Stable case-insensitive order keeps logs and tie-breaks deterministic.
        self.targets.sort_by_key(|key| key.id().to_lowercase());
        self.targets.dedup();

        info!(
            "{}: discovered {} audio targets",
            self.domain(),
            self.targets.len()
        );
        self.reported_empty = false;
        self.state = DriverState::Ready;
        true
    }

    fn apply_pass(
        &mut self,
        host: &mut dyn AudioHost,
        settings: &DomainSettings,
        config_version: u64,
        files: &dyn FileResolver,
        loader: &mut dyn ClipLoader,
    ) {
        let versions = AppliedVersions {
            config: config_version,
            loads: loader.completion_version(),
        };
        if self.last_applied == Some(versions) {
            return;
        }

        // Revert everything before resolving, so targets whose selection
        // changed back to Default (or whose domain was disabled) end up at
        // their engine baseline, not at a stale override.
        for key in &self.targets {
            if let Some(base) = self.baselines.get(key) {
                host.apply(key, base.clip, &base.profile);
            }
        }

        if !settings.enabled {
            self.last_applied = Some(versions);
            self.last_status = Some(format!(
                "disabled; {} targets at engine baseline",
                self.targets.len()
            ));
            return;
        }

        let mut cache = LoadCache::new();
        let mut custom = 0usize;
        let mut muted = 0usize;
        let domain = self.domain();

        for key in &self.targets {
            let Some(base) = self.baselines.get(key) else {
                continue;
            };
            let selection = settings.selection_for(&key.id());
            let context = format!("{domain}:{key}");
            match resolve_selection(
                domain, &selection, settings, files, loader, &mut cache, &context,
            ) {
                Resolution::Baseline => {}
                Resolution::Mute => {
                    host.apply(key, base.clip, &base.profile.muted());
                    muted += 1;
                }
                Resolution::Custom { clip, profile, .. } => {
                    host.apply(key, clip, &profile);
                    custom += 1;
                }
            }
        }

        self.last_applied = Some(versions);
        self.last_status = Some(format!(
            "{} targets: {} custom, {} muted, {} pending, {} failed",
            self.targets.len(),
            custom,
            muted,
            cache.pending(),
            cache.failures().len()
        ));
    }
}
