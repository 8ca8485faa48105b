//! Selection resolution and fallback policy.
//!
//! `resolve_selection` is the single decision point for one target: given
//! the configured selection key, it produces baseline/mute/custom, applying
//! the domain's fallback policy when the selection cannot be loaded. All
//! filesystem and loader calls funnel through the per-pass [`LoadCache`], so
//! a key referenced by many targets (or as the alternate fallback) is
//! resolved and loaded at most once per apply pass.
//!
//! Failures are recovered locally and logged with the caller's context
//! label; nothing here ever propagates an error to the host. Hard failures
//! are not cached across passes: a selection fixed on disk self-heals on the
//! next pass that runs.

use std::path::PathBuf;

use hashbrown::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use klaxon_shared::{AudioProfile, DomainSettings, FallbackPolicy, SelectionKey};

use crate::domain::Domain;
use crate::host::{ClipHandle, ClipLoad, ClipLoader, FileResolver};

/// Why a selection key failed to resolve.
///
/// A pending load is not an error and has no variant here; it is the
/// `Pending` arm of the per-pass load outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no profile registered for selection '{0}'")]
    NoProfile(String),
    #[error("no custom audio file found for selection '{0}'")]
    FileNotFound(String),
    #[error("failed to load '{path}': {reason}")]
    LoadFailure { path: String, reason: String },
    #[error("alternate fallback '{0}' cannot be used")]
    MisconfiguredFallback(String),
}

/// Decision for one target; recomputed every apply pass, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Leave the target at its engine baseline.
    Baseline,
    /// Baseline parameters with volume forced to zero.
    Mute,
    /// Apply a custom clip with its clamped profile.
    Custom {
        clip: ClipHandle,
        profile: AudioProfile,
        path: PathBuf,
    },
}

/// Per-key load outcome memoized for the duration of one apply pass.
#[derive(Debug, Clone)]
enum LoadOutcome {
    Ready {
        clip: ClipHandle,
        profile: AudioProfile,
        path: PathBuf,
    },
    Pending,
    Failed(ResolveError),
}

/// Memoizes resolve+load attempts within a single apply pass.
///
/// Discarded after every pass, so pending and failed outcomes are always
/// recomputed fresh the next time something could have changed.
#[derive(Debug, Default)]
pub struct LoadCache {
    outcomes: HashMap<String, LoadOutcome>,
    pending: usize,
    failures: Vec<(String, ResolveError)>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys whose load is still in flight this pass.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Distinct keys that hard-failed this pass, with their errors.
    pub fn failures(&self) -> &[(String, ResolveError)] {
        &self.failures
    }

    fn lookup_or_load(
        &mut self,
        domain: Domain,
        key: &SelectionKey,
        settings: &DomainSettings,
        files: &dyn FileResolver,
        loader: &mut dyn ClipLoader,
    ) -> LoadOutcome {
        let normalized = key.normalized();
        if let Some(outcome) = self.outcomes.get(&normalized) {
            return outcome.clone();
        }

        let outcome = load_selection(domain, key, settings, files, loader);
        match &outcome {
            LoadOutcome::Pending => self.pending += 1,
            LoadOutcome::Failed(err) => {
                self.failures.push((key.as_str().to_string(), err.clone()));
            }
            LoadOutcome::Ready { .. } => {}
        }
        self.outcomes.insert(normalized, outcome.clone());
        outcome
    }
}

/// Resolve one selection key, in order: profile lookup, file resolution,
/// clip load. The single place filesystem and loader calls happen.
fn load_selection(
    domain: Domain,
    key: &SelectionKey,
    settings: &DomainSettings,
    files: &dyn FileResolver,
    loader: &mut dyn ClipLoader,
) -> LoadOutcome {
    if key.is_empty() || key.is_default() {
        return LoadOutcome::Failed(ResolveError::NoProfile(key.as_str().to_string()));
    }
    let Some(profile) = settings.custom_profiles.get(key) else {
        return LoadOutcome::Failed(ResolveError::NoProfile(key.as_str().to_string()));
    };
    let Some(path) = files.resolve_path(domain, &settings.custom_folder, key) else {
        return LoadOutcome::Failed(ResolveError::FileNotFound(key.as_str().to_string()));
    };
    match loader.load(&path) {
        ClipLoad::Ready(clip) => LoadOutcome::Ready {
            clip,
            profile,
            path,
        },
        ClipLoad::Pending => LoadOutcome::Pending,
        ClipLoad::Failed(reason) => LoadOutcome::Failed(ResolveError::LoadFailure {
            path: path.display().to_string(),
            reason,
        }),
    }
}

/// Decide what to apply for one target.
///
/// `context` identifies the target in log lines (e.g. `siren:police.na`).
///
/// A pending load is not destructive: the target stays at baseline this
/// pass and is re-resolved once the loader's completion version bumps.
pub fn resolve_selection(
    domain: Domain,
    selection: &SelectionKey,
    settings: &DomainSettings,
    files: &dyn FileResolver,
    loader: &mut dyn ClipLoader,
    cache: &mut LoadCache,
    context: &str,
) -> Resolution {
    if selection.is_default() {
        return Resolution::Baseline;
    }

    match cache.lookup_or_load(domain, selection, settings, files, loader) {
        LoadOutcome::Ready {
            clip,
            profile,
            path,
        } => Resolution::Custom {
            clip,
            profile,
            path,
        },
        LoadOutcome::Pending => {
            debug!("{context}: selection '{selection}' still loading; baseline this pass");
            Resolution::Baseline
        }
        LoadOutcome::Failed(err) => {
            fall_back(domain, selection, &err, settings, files, loader, cache, context)
        }
    }
}

/// Policy-driven secondary fallback after a hard failure.
///
/// Only one level of alternate is ever attempted: a failing alternate
/// degrades to baseline instead of recursing.
#[allow(clippy::too_many_arguments)]
fn fall_back(
    domain: Domain,
    selection: &SelectionKey,
    err: &ResolveError,
    settings: &DomainSettings,
    files: &dyn FileResolver,
    loader: &mut dyn ClipLoader,
    cache: &mut LoadCache,
    context: &str,
) -> Resolution {
    match settings.fallback {
        FallbackPolicy::Mute => {
            warn!("{context}: selection '{selection}' failed ({err}); muting target");
            Resolution::Mute
        }
        FallbackPolicy::AlternateCustom => {
            let alternate = &settings.alternate_selection;
            if alternate.is_default() || alternate.is_empty() {
                let misconfigured =
                    ResolveError::MisconfiguredFallback(alternate.as_str().to_string());
                warn!(
                    "{context}: selection '{selection}' failed ({err}); {misconfigured}; \
                     using engine default"
                );
                return Resolution::Baseline;
            }
            if alternate == selection {
                warn!(
                    "{context}: selection '{selection}' failed ({err}); alternate fallback \
                     refers to the failed selection itself; using engine default"
                );
                return Resolution::Baseline;
            }
            match cache.lookup_or_load(domain, alternate, settings, files, loader) {
                LoadOutcome::Ready {
                    clip,
                    profile,
                    path,
                } => {
                    info!(
                        "{context}: selection '{selection}' failed ({err}); \
                         using alternate '{alternate}'"
                    );
                    Resolution::Custom {
                        clip,
                        profile,
                        path,
                    }
                }
                LoadOutcome::Pending => {
                    debug!(
                        "{context}: alternate '{alternate}' still loading; baseline this pass"
                    );
                    Resolution::Baseline
                }
                LoadOutcome::Failed(alt_err) => {
                    warn!(
                        "{context}: selection '{selection}' failed ({err}) and alternate \
                         '{alternate}' failed ({alt_err}); using engine default"
                    );
                    Resolution::Baseline
                }
            }
        }
        FallbackPolicy::UseDefault => {
            warn!("{context}: selection '{selection}' failed ({err}); using engine default");
            Resolution::Baseline
        }
    }
}
