//! Integration tests for the audio override engine.
//!
//! Drives a full [`ModRuntime`] through world lifecycle and tick cycles
//! against the recording test host, covering selection, fallback policy,
//! idempotent re-application, and baseline restoration end to end.

#[cfg(test)]
mod tests {
    use klaxon_shared::{AudioProfile, FallbackPolicy, ModConfig, SelectionKey};

    use crate::domain::{Domain, Region, TargetKey, VehicleType};
    use crate::host::{ClipHandle, ClipLoader, HostAudioSource};
    use crate::runtime::ModRuntime;
    use crate::test_utils::{TestFiles, TestHost, TestLoader};

    const BASELINE_CLIP: ClipHandle = ClipHandle(1);

    /// A host with one police siren source. Discovery yields two targets
    /// sharing its baseline: the vehicle pair and the prefab.
    fn siren_host() -> TestHost {
        let mut host = TestHost::new();
        host.add_source(
            Domain::Siren,
            HostAudioSource {
                prefab_name: "PoliceSiren".to_string(),
                mixer_group: "effects".to_string(),
                vehicle: Some((VehicleType::Police, Region::NorthAmerica)),
                clip: BASELINE_CLIP,
                profile: AudioProfile::default(),
            },
        );
        host
    }

    fn siren_config(selection: &str, fallback: FallbackPolicy, alternate: &str) -> ModConfig {
        let mut config = ModConfig::default();
        config.sirens.fallback = fallback;
        config.sirens.alternate_selection = SelectionKey::new(alternate);
        config
            .sirens
            .custom_profiles
            .insert(SelectionKey::new("siren_a"), AudioProfile::default());
        config
            .sirens
            .custom_profiles
            .insert(SelectionKey::new("siren_b"), AudioProfile::default());
        config
            .sirens
            .custom_profiles
            .insert(SelectionKey::new("missing_file"), AudioProfile::default());
        config.sirens.set_selection("police.na", SelectionKey::new(selection));
        config
    }

    fn police_na() -> TargetKey {
        TargetKey::Vehicle(VehicleType::Police, Region::NorthAmerica)
    }

    #[test]
    fn valid_selection_applies_custom_clip() {
        let mut host = siren_host();
        let mut files = TestFiles::new();
        files.map("siren_a", "Sirens/siren_a.ogg");
        let mut loader = TestLoader::new();
        loader.ready("Sirens/siren_a.ogg", ClipHandle(40));

        let mut runtime =
            ModRuntime::with_config(siren_config("siren_a", FallbackPolicy::UseDefault, ""));
        runtime.on_world_loaded();
        runtime.tick(&mut host, &files, &mut loader);

        assert_eq!(host.live_clip(&police_na()), Some(ClipHandle(40)));
        // The untouched prefab target stays at its engine baseline.
        let prefab = TargetKey::VehiclePrefab("PoliceSiren".to_string());
        assert_eq!(host.live_clip(&prefab), Some(BASELINE_CLIP));
    }

    #[test]
    fn missing_file_with_mute_policy_silences_target() {
        let mut host = siren_host();
        let files = TestFiles::new();
        let mut loader = TestLoader::new();

        let mut runtime =
            ModRuntime::with_config(siren_config("missing_file", FallbackPolicy::Mute, ""));
        runtime.on_world_loaded();
        runtime.tick(&mut host, &files, &mut loader);

        assert_eq!(host.live_clip(&police_na()), Some(BASELINE_CLIP));
        let live = host.live_profile(&police_na()).unwrap();
        assert_eq!(live.volume, 0.0);
    }

    #[test]
    fn missing_file_with_alternate_uses_alternate_clip() {
        let mut host = siren_host();
        let mut files = TestFiles::new();
        files.map("siren_b", "Sirens/siren_b.ogg");
        let mut loader = TestLoader::new();
        loader.ready("Sirens/siren_b.ogg", ClipHandle(41));

        let mut runtime = ModRuntime::with_config(siren_config(
            "missing_file",
            FallbackPolicy::AlternateCustom,
            "siren_b",
        ));
        runtime.on_world_loaded();
        runtime.tick(&mut host, &files, &mut loader);

        assert_eq!(host.live_clip(&police_na()), Some(ClipHandle(41)));
    }

    #[test]
    fn unchanged_inputs_make_second_tick_a_no_op() {
        let mut host = siren_host();
        let mut files = TestFiles::new();
        files.map("siren_a", "Sirens/siren_a.ogg");
        let mut loader = TestLoader::new();
        loader.ready("Sirens/siren_a.ogg", ClipHandle(40));

        let mut runtime =
            ModRuntime::with_config(siren_config("siren_a", FallbackPolicy::UseDefault, ""));
        runtime.on_world_loaded();
        runtime.tick(&mut host, &files, &mut loader);
        let applied = host.applied().len();
        let loads = loader.load_calls().len();

        runtime.tick(&mut host, &files, &mut loader);
        assert_eq!(host.applied().len(), applied);
        assert_eq!(loader.load_calls().len(), loads);
    }

    #[test]
    fn disabling_domain_restores_engine_baseline() {
        let mut host = siren_host();
        let mut files = TestFiles::new();
        files.map("siren_a", "Sirens/siren_a.ogg");
        let mut loader = TestLoader::new();
        loader.ready("Sirens/siren_a.ogg", ClipHandle(40));

        let mut runtime =
            ModRuntime::with_config(siren_config("siren_a", FallbackPolicy::UseDefault, ""));
        runtime.on_world_loaded();
        runtime.tick(&mut host, &files, &mut loader);
        assert_eq!(host.live_clip(&police_na()), Some(ClipHandle(40)));

        runtime.set_enabled(Domain::Siren, false);
        runtime.tick(&mut host, &files, &mut loader);
        assert_eq!(host.live_clip(&police_na()), Some(BASELINE_CLIP));
        let live = host.live_profile(&police_na()).unwrap();
        assert!(live.approx_eq(&AudioProfile::default()));
    }

    #[test]
    fn pending_load_applies_once_complete() {
        let mut host = siren_host();
        let mut files = TestFiles::new();
        files.map("siren_a", "Sirens/siren_a.ogg");
        let mut loader = TestLoader::new();
        loader.pending("Sirens/siren_a.ogg");

        let mut runtime =
            ModRuntime::with_config(siren_config("siren_a", FallbackPolicy::UseDefault, ""));
        runtime.on_world_loaded();
        runtime.tick(&mut host, &files, &mut loader);
        assert_eq!(host.live_clip(&police_na()), Some(BASELINE_CLIP));

        loader.complete("Sirens/siren_a.ogg", ClipHandle(40));
        runtime.tick(&mut host, &files, &mut loader);
        assert_eq!(host.live_clip(&police_na()), Some(ClipHandle(40)));
    }

    #[test]
    fn shared_selection_resolves_once_per_pass() {
        let mut host = siren_host();
        let mut files = TestFiles::new();
        files.map("siren_a", "Sirens/siren_a.ogg");
        let mut loader = TestLoader::new();
        loader.ready("Sirens/siren_a.ogg", ClipHandle(40));

        let mut config = siren_config("siren_a", FallbackPolicy::UseDefault, "");
        config
            .sirens
            .set_selection("PoliceSiren", SelectionKey::new("siren_a"));
        let mut runtime = ModRuntime::with_config(config);
        runtime.on_world_loaded();
        runtime.tick(&mut host, &files, &mut loader);

        assert_eq!(host.live_clip(&police_na()), Some(ClipHandle(40)));
        let prefab = TargetKey::VehiclePrefab("PoliceSiren".to_string());
        assert_eq!(host.live_clip(&prefab), Some(ClipHandle(40)));
        assert_eq!(loader.load_calls().len(), 1);
        assert_eq!(files.resolve_calls(), 1);
    }

    #[test]
    fn catalog_change_re_resolves_failed_selection() {
        let mut host = siren_host();
        let mut files = TestFiles::new();
        let mut loader = TestLoader::new();

        let mut runtime =
            ModRuntime::with_config(siren_config("siren_a", FallbackPolicy::UseDefault, ""));
        runtime.on_world_loaded();
        runtime.tick(&mut host, &files, &mut loader);
        assert_eq!(host.live_clip(&police_na()), Some(BASELINE_CLIP));

        // The file shows up on disk; a rescan notification self-heals it.
        files.map("siren_a", "Sirens/siren_a.ogg");
        loader.ready("Sirens/siren_a.ogg", ClipHandle(40));
        runtime.notify_catalog_changed();
        runtime.tick(&mut host, &files, &mut loader);
        assert_eq!(host.live_clip(&police_na()), Some(ClipHandle(40)));
    }

    #[test]
    fn world_unload_resets_drivers() {
        let mut host = siren_host();
        let mut files = TestFiles::new();
        files.map("siren_a", "Sirens/siren_a.ogg");
        let mut loader = TestLoader::new();
        loader.ready("Sirens/siren_a.ogg", ClipHandle(40));

        let mut runtime =
            ModRuntime::with_config(siren_config("siren_a", FallbackPolicy::UseDefault, ""));
        runtime.on_world_loaded();
        runtime.tick(&mut host, &files, &mut loader);

        runtime.on_world_unloaded();
        assert_eq!(
            runtime.driver_state(Domain::Siren),
            crate::driver::DriverState::AwaitingSession
        );
        let applied = host.applied().len();
        runtime.tick(&mut host, &files, &mut loader);
        assert_eq!(host.applied().len(), applied);
    }
}
