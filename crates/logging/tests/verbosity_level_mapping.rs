//! Tests for mapping verbose levels and flag tokens onto subsystem levels.

use logging::{MAX_LEVEL, Subsystem, VerbosityConfig, filter_name};

// ============================================================================
// Verbose level mapping
// ============================================================================

#[test]
fn level_zero_only_reports_quality() {
    let config = VerbosityConfig::from_verbose_level(0);
    for subsystem in Subsystem::ALL {
        let expected = u8::from(subsystem == Subsystem::Quality);
        assert_eq!(config.level(subsystem), expected, "{subsystem}");
    }
}

#[test]
fn level_one_adds_seam_and_batch() {
    let config = VerbosityConfig::from_verbose_level(1);
    assert_eq!(config.level(Subsystem::Seam), 1);
    assert_eq!(config.level(Subsystem::Batch), 1);
    assert_eq!(config.level(Subsystem::Heal), 0);
}

#[test]
fn level_two_keeps_per_step_subsystems_quiet() {
    let config = VerbosityConfig::from_verbose_level(2);
    assert_eq!(config.level(Subsystem::Hash), 1);
    assert_eq!(config.level(Subsystem::Index), 1);
    assert_eq!(config.level(Subsystem::Heal), 2);
}

#[test]
fn high_levels_saturate() {
    assert_eq!(
        VerbosityConfig::from_verbose_level(3),
        VerbosityConfig::from_verbose_level(200)
    );
    let config = VerbosityConfig::from_verbose_level(3);
    assert!(Subsystem::ALL.iter().all(|s| config.level(*s) == MAX_LEVEL));
}

// ============================================================================
// Directives
// ============================================================================

#[test]
fn directive_lists_every_target() {
    let directive = VerbosityConfig::from_verbose_level(1).directive();
    assert!(directive.starts_with("warn,"));
    for subsystem in Subsystem::ALL {
        assert!(directive.contains(subsystem.target()), "{directive}");
    }
    assert!(directive.contains("exediff::hash=off"));
    assert!(directive.contains("exediff::seam=info"));
}

#[test]
fn filter_names_cover_all_levels() {
    assert_eq!(filter_name(0), "off");
    assert_eq!(filter_name(1), "info");
    assert_eq!(filter_name(2), "debug");
    assert_eq!(filter_name(7), "trace");
}

#[test]
fn targets_map_back_to_subsystems() {
    assert_eq!(Subsystem::from_target("exediff::heal"), Some(Subsystem::Heal));
    assert_eq!(
        Subsystem::from_target("exediff::index::query"),
        Some(Subsystem::Index)
    );
    assert_eq!(Subsystem::from_target("exediff::healer"), None);
    assert_eq!(Subsystem::from_target("other"), None);
}

// ============================================================================
// Flag tokens
// ============================================================================

#[test]
fn flag_list_overrides_levels() {
    let mut config = VerbosityConfig::from_verbose_level(0);
    config.apply_flags(" seam2, heal ,").unwrap();
    assert_eq!(config.level(Subsystem::Seam), 2);
    assert_eq!(config.level(Subsystem::Heal), 1);
}

#[test]
fn flag_list_stops_at_first_bad_token() {
    let mut config = VerbosityConfig::default();
    assert!(config.apply_flags("seam2,bogus,heal").is_err());
    assert_eq!(config.level(Subsystem::Seam), 2);
    assert_eq!(config.level(Subsystem::Heal), 0);
}

#[cfg(feature = "serde")]
#[test]
fn config_round_trips_through_json() {
    let config = VerbosityConfig::from_verbose_level(2);
    let json = serde_json::to_string(&config).unwrap();
    let back: VerbosityConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
