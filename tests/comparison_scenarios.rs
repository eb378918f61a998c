//! End-to-end comparisons through the public pipeline.

use exediff::{BatchDiff, BleachKind, ComparisonSettings, Error, Quality, compare};
use proptest::prelude::*;
use test_support::{code_like, insert_bytes, random_bytes};

/// `code_like` bytes with an ARM `BL` every 256 bytes whose offset depends
/// on `salt`.
fn with_branches(seed: u64, len: usize, salt: u32) -> Vec<u8> {
    let mut bytes = code_like(seed, len);
    for (n, at) in (0..len - 4).step_by(256).enumerate() {
        let word = 0xeb00_0000 | ((n as u32 * 0x101 + salt) & 0x00ff_ffff);
        bytes[at..at + 4].copy_from_slice(&word.to_le_bytes());
    }
    bytes
}

// ============================================================================
// Single comparisons
// ============================================================================

#[test]
fn identical_images_are_exact() {
    let bytes = code_like(0x51, 8192);
    let comparison = compare(&bytes, &bytes, &ComparisonSettings::default()).unwrap();
    assert_eq!(comparison.quality(), Quality::ExactSame);
    assert!(comparison.is_good());
    assert_eq!(comparison.diff().overall().len(), 1);
    assert!(comparison.healing_cost().is_some());
    assert_eq!(comparison.stats().overall().octets(), 0);
}

#[test]
fn inserted_bytes_drift_away() {
    let original = code_like(0xfeed, 8192);
    let modified = insert_bytes(&original, 3000, &[0xde, 0xad, 0xbe, 0xef]);
    let comparison = compare(&original, &modified, &ComparisonSettings::default()).unwrap();
    assert_eq!(comparison.quality(), Quality::DriftAway);
    assert_eq!(comparison.diff().ordered().len(), 2);
}

#[test]
fn unrelated_images_fail() {
    let comparison = compare(
        &random_bytes(1, 8192),
        &random_bytes(2, 8192),
        &ComparisonSettings::default(),
    )
    .unwrap();
    assert_eq!(comparison.quality(), Quality::MatchFail);
    assert!(!comparison.is_good());
}

#[test]
fn healing_can_be_skipped() {
    let bytes = code_like(0x52, 4096);
    let settings = ComparisonSettings::default().with_heal(false);
    let comparison = compare(&bytes, &bytes, &settings).unwrap();
    assert!(comparison.healing_cost().is_none());
    assert!(comparison.base_cost().total_bytes() > 0);
}

#[test]
fn tiny_original_is_an_error() {
    let result = compare(&[0u8; 4], &code_like(1, 4096), &ComparisonSettings::default());
    assert!(matches!(result, Err(Error::Match(_))));
}

// ============================================================================
// Bleaching
// ============================================================================

#[test]
fn branch_offsets_differ_without_bleach() {
    let original = with_branches(0x77, 8192, 0);
    let modified = with_branches(0x77, 8192, 0x4321);
    let comparison = compare(&original, &modified, &ComparisonSettings::default()).unwrap();
    assert_ne!(comparison.quality(), Quality::ExactSame);
}

#[test]
fn arm_bleach_hides_branch_offsets() {
    let original = with_branches(0x77, 8192, 0);
    let modified = with_branches(0x77, 8192, 0x4321);
    let settings = ComparisonSettings::default().with_bleach(BleachKind::ArmBl);
    let comparison = compare(&original, &modified, &settings).unwrap();
    assert_eq!(comparison.quality(), Quality::ExactSame);
}

#[test]
fn bleach_leaves_caller_buffers_alone() {
    let original = with_branches(0x78, 4096, 0);
    let before = original.clone();
    let settings = ComparisonSettings::default().with_bleach(BleachKind::Clear);
    let _ = compare(&original, &original, &settings).unwrap();
    assert_eq!(original, before);
}

// ============================================================================
// Batches
// ============================================================================

#[test]
fn batch_matches_one_shot_comparisons() {
    let original = code_like(0xb0, 8192);
    let modified = [
        original.clone(),
        insert_bytes(&original, 1000, &[9; 8]),
        random_bytes(3, 4096),
    ];
    let settings = ComparisonSettings::default();
    let batch = BatchDiff::new(&original, settings.clone()).unwrap();
    let results = batch.compare_all(modified.iter().map(Vec::as_slice));
    assert_eq!(results.len(), 3);

    for (bytes, result) in modified.iter().zip(results) {
        let batched = result.unwrap();
        let single = compare(&original, bytes, &settings).unwrap();
        assert_eq!(batched.quality(), single.quality());
        assert_eq!(batched.diff().overall(), single.diff().overall());
        assert_eq!(batched.stats(), single.stats());
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_batch_keeps_order() {
    let original = code_like(0xb1, 8192);
    let modified = [
        insert_bytes(&original, 2000, &[7; 4]),
        original.clone(),
        random_bytes(5, 8192),
    ];
    let slices: Vec<&[u8]> = modified.iter().map(Vec::as_slice).collect();
    let batch = BatchDiff::new(&original, ComparisonSettings::default()).unwrap();

    let sequential = batch.compare_all(slices.iter().copied());
    let parallel = batch.compare_all_par(&slices);
    for (a, b) in sequential.into_iter().zip(parallel) {
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.quality(), b.quality());
        assert_eq!(a.diff().overall(), b.diff().overall());
    }
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn report_lists_every_section() {
    let original = code_like(0xfeed, 8192);
    let modified = insert_bytes(&original, 3000, &[0xde, 0xad, 0xbe, 0xef]);
    let comparison = compare(&original, &modified, &ComparisonSettings::default()).unwrap();
    let report = comparison.report();

    assert!(report.starts_with("Quality: 5 ("), "{report}");
    for needle in [
        "Mapping: 2 ordered",
        "unconfirmed matches",
        "Monotonic matches:",
        "All matches found:",
        "Hamming:",
        "overall={",
        "Costs of sequential (coarse) match:",
        "Costs of refinement (greedy) match:",
    ] {
        assert!(report.contains(needle), "missing {needle:?} in\n{report}");
    }
}

#[test]
fn report_without_healing_omits_refinement() {
    let bytes = code_like(0xc1, 4096);
    let settings = ComparisonSettings::default().with_heal(false);
    let report = compare(&bytes, &bytes, &settings).unwrap().report();
    assert!(!report.contains("refinement"));
}

#[test]
fn report_streams_like_display() {
    let bytes = code_like(0xc2, 4096);
    let comparison = compare(&bytes, &bytes, &ComparisonSettings::default()).unwrap();
    let mut streamed = String::new();
    comparison.write_report(&mut streamed).unwrap();
    assert_eq!(streamed, comparison.to_string());
    assert_eq!(streamed, comparison.report());
}

#[cfg(feature = "subscriber")]
#[test]
fn subscriber_installs_once() {
    let config = exediff::VerbosityConfig::from_verbose_level(1);
    assert!(exediff::init_tracing(&config).is_ok());
    assert!(matches!(
        exediff::init_tracing(&config),
        Err(exediff::InitError::AlreadyInstalled(_))
    ));
}

#[cfg(feature = "serde")]
#[test]
fn settings_round_trip_through_json() {
    let settings = ComparisonSettings::default()
        .with_bleach(BleachKind::ThumbBl)
        .with_stitches(Some(64));
    let json = serde_json::to_string(&settings).unwrap();
    let back: ComparisonSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(back, settings);

    let partial: ComparisonSettings = serde_json::from_str(r#"{"heal":false}"#).unwrap();
    assert!(!partial.heal);
    assert_eq!(partial.roller, settings.roller);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn self_comparison_is_exact(seed in any::<u64>(), len in 1024usize..6144) {
        let bytes = code_like(seed, len);
        let comparison = compare(&bytes, &bytes, &ComparisonSettings::default()).unwrap();
        prop_assert_eq!(comparison.quality(), Quality::ExactSame);
    }
}
