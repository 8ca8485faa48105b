//! Check command - validate a configuration document
//!
//! Reports three classes of problems before the config ever reaches a
//! running game: profile fields that clamping would change, selections
//! naming no catalog profile (with did-you-mean suggestions), and
//! degenerate alternate-fallback settings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use klaxon_core::find_similar;
use klaxon_shared::{AudioProfile, DomainSettings, FallbackPolicy, ModConfig, PROFILE_EPSILON};

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Configuration document to validate (klaxon.json)
    pub config: PathBuf,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let config = ModConfig::load_from(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    println!("=== Checking {} ===", args.config.display());

    let mut problems = 0;
    for (name, settings) in [
        ("sirens", &config.sirens),
        ("ambience", &config.ambience),
        ("transit", &config.transit),
    ] {
        problems += check_domain(name, settings);
    }

    if problems == 0 {
        println!("No problems found");
        Ok(())
    } else {
        anyhow::bail!("{problems} problem(s) found")
    }
}

fn check_domain(name: &str, settings: &DomainSettings) -> usize {
    let mut problems = 0;

    // Out-of-range profile fields, sorted for stable output.
    let mut profiles: Vec<_> = settings.custom_profiles.iter().collect();
    profiles.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (key, profile) in profiles {
        let changes = clamp_changes(profile);
        if !changes.is_empty() {
            println!("  [{name}] profile '{key}' has out-of-range fields:");
            for change in changes {
                println!("    {change}");
            }
            problems += 1;
        }
    }

    // Selections that name no catalog profile.
    let catalog: Vec<&str> = settings
        .custom_profiles
        .keys()
        .map(|key| key.as_str())
        .collect();
    let mut selections: Vec<_> = settings.target_selections.iter().collect();
    selections.sort_by_key(|(target, _)| target.to_lowercase());
    for (target, selection) in selections {
        if selection.is_default() || selection.is_empty() {
            continue;
        }
        if !settings.custom_profiles.contains(selection) {
            print!("  [{name}] target '{target}' selects unknown '{selection}'");
            let suggestions = find_similar(selection.as_str(), catalog.iter().copied());
            if suggestions.is_empty() {
                println!();
            } else {
                println!(" (did you mean {}?)", suggestions.join(", "));
            }
            problems += 1;
        }
    }

    // Degenerate alternate-fallback settings.
    if settings.fallback == FallbackPolicy::AlternateCustom {
        let alternate = &settings.alternate_selection;
        if alternate.is_default() || alternate.is_empty() {
            println!("  [{name}] fallback is AlternateCustom but no alternate selection is set");
            problems += 1;
        } else if !settings.custom_profiles.contains(alternate) {
            println!("  [{name}] alternate selection '{alternate}' names no catalog profile");
            problems += 1;
        }
    }

    problems
}

/// Field-by-field diff between a profile as persisted and its clamped form.
fn clamp_changes(profile: &AudioProfile) -> Vec<String> {
    let clamped = profile.clamped();
    let mut changes = Vec::new();
    let mut field = |label: &str, before: f32, after: f32| {
        if (before - after).abs() > PROFILE_EPSILON {
            changes.push(format!("{label}: {before} -> {after}"));
        }
    };
    field("volume", profile.volume, clamped.volume);
    field("pitch", profile.pitch, clamped.pitch);
    field("spatial_blend", profile.spatial_blend, clamped.spatial_blend);
    field("doppler_level", profile.doppler_level, clamped.doppler_level);
    field("spread", profile.spread, clamped.spread);
    field("min_distance", profile.min_distance, clamped.min_distance);
    field("max_distance", profile.max_distance, clamped.max_distance);
    field("fade_in_seconds", profile.fade_in_seconds, clamped.fade_in_seconds);
    field(
        "fade_out_seconds",
        profile.fade_out_seconds,
        clamped.fade_out_seconds,
    );
    changes
}
