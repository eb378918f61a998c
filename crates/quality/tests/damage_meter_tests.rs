//! Verdicts on realistic diffs and the algebra of the lattice.

use matching::{Sampling, SeamBase, SeamDiff};
use partition::{Metrics, TreeSettings};
use proptest::prelude::*;
use quality::{Considerable, DamageMeter, HammingStat, Quality, Thresholds};
use rolling::{Endian, HashRoller};
use test_support::{code_like, delete_bytes, insert_bytes, overwrite_bytes, random_bytes};

fn assess(original: &[u8], modified: &[u8], heal: bool) -> (SeamDiff, Quality) {
    let base = SeamBase::index(
        original,
        HashRoller::TamienHalfword,
        Endian::Little,
        Metrics::ShortRadial,
        &TreeSettings::default(),
    )
    .unwrap();
    let fingerprints = HashRoller::TamienHalfword.index(modified, Endian::Little);
    let mut diff = base.approximate(&fingerprints, &Sampling::default()).unwrap();
    if heal {
        diff.heal(original, modified).unwrap();
    }
    let stats = HammingStat::of_diff(&diff, original, modified);
    let quality = DamageMeter::default().assess(&diff, &stats);
    (diff, quality)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn identical_buffers_are_exact() {
    let bytes = code_like(0x1d, 8192);
    let (_, quality) = assess(&bytes, &bytes, true);
    assert!(quality <= Quality::PlaceSame, "{quality}");
    assert_eq!(quality, Quality::ExactSame);
}

#[test]
fn insertion_drifts_away() {
    let original = code_like(0xfeed, 8192);
    let modified = insert_bytes(&original, 3000, &[0xde, 0xad, 0xbe, 0xef]);
    let (_, quality) = assess(&original, &modified, true);
    assert_eq!(quality, Quality::DriftAway);
    assert!(quality.is_good());
}

#[test]
fn random_buffers_fail() {
    let (diff, quality) = assess(&random_bytes(10, 8192), &random_bytes(11, 8192), true);
    assert_eq!(quality, Quality::MatchFail, "{} outliers", diff.outlier_count());
    assert!(!quality.is_good());
}

#[test]
fn nothing_sampled_fails() {
    let original = code_like(5, 4096);
    let (diff, quality) = assess(&original, &original[..16], false);
    assert!(diff.overall().is_empty());
    assert_eq!(quality, Quality::MatchFail);
}

#[test]
fn overwrite_in_place_keeps_position() {
    let original = code_like(0x0e, 8192);
    let modified = overwrite_bytes(&original, 4000, &[0x5a; 16]);
    let (diff, quality) = assess(&original, &modified, true);
    assert_eq!(quality, Quality::PlaceSame, "{}", diff.overall());
    assert_eq!(diff.ordered().len(), 1);
}

#[test]
fn swapped_neighbor_blocks_keep_position() {
    let original = code_like(0x0f, 8192);
    let mut modified = original.clone();
    modified[4000..4016].copy_from_slice(&original[4016..4032]);
    modified[4016..4032].copy_from_slice(&original[4000..4016]);
    let (diff, quality) = assess(&original, &modified, true);
    assert_eq!(quality, Quality::PlaceSame, "{}", diff.overall());
}

#[test]
fn prefix_shift_drifts_uniformly() {
    let original = code_like(0x10, 8192);
    let mut modified = insert_bytes(&original, 0, &[0x11; 4]);
    modified.truncate(original.len());
    let (diff, quality) = assess(&original, &modified, true);
    assert_eq!(quality, Quality::DriftSame, "{}", diff.overall());
    let first = diff.ordered().first().copied().unwrap();
    assert_eq!(first.translation(), -4);
}

#[test]
fn balanced_insert_and_delete_vary_in_place() {
    let original = code_like(0x12, 8192);
    let inserted = insert_bytes(&original, 3000, &[0xde, 0xad, 0xbe, 0xef]);
    let modified = delete_bytes(&inserted, 5000, 4);
    assert_eq!(modified.len(), original.len());
    let (diff, quality) = assess(&original, &modified, true);
    assert_eq!(quality, Quality::PlaceVary, "{}", diff.overall());
    let first = diff.ordered().first().copied().unwrap();
    let last = diff.ordered().last().copied().unwrap();
    assert_eq!((first.translation(), last.translation()), (0, 0));
}

#[test]
fn balanced_edits_after_shift_vary_in_drift() {
    let original = code_like(0x13, 8192);
    let mut shifted = insert_bytes(&original, 0, &[0x11; 4]);
    shifted.truncate(original.len());
    let inserted = insert_bytes(&shifted, 3000, &[0xde, 0xad, 0xbe, 0xef]);
    let modified = delete_bytes(&inserted, 5000, 4);
    let (diff, quality) = assess(&original, &modified, true);
    assert_eq!(quality, Quality::DriftVary, "{}", diff.overall());
}

#[test]
fn strict_thresholds_reject_edits() {
    let original = code_like(0xaa, 8192);
    let mut modified = original.clone();
    for byte in modified.iter_mut().skip(7).step_by(64) {
        *byte ^= 0xff;
    }
    let (diff, _) = assess(&original, &modified, true);
    let stats = HammingStat::of_diff(&diff, &original, &modified);

    let lenient = DamageMeter::default().assess(&diff, &stats);
    assert!(lenient.is_good(), "{lenient}");

    let strict = Thresholds::new(0.5, 0.4, 0.001, 0.3).unwrap();
    assert_eq!(DamageMeter::new(strict).assess(&diff, &stats), Quality::MatchFail);
}

#[test]
fn meter_accumulates_across_assessments() {
    let original = code_like(0x77, 4096);
    let (good, _) = assess(&original, &original, true);
    let good_stats = HammingStat::of_diff(&good, &original, &original);
    let (bad, _) = assess(&original, &original[..16], false);
    let bad_stats = HammingStat::of_diff(&bad, &original, &original[..16]);

    let mut meter = DamageMeter::default();
    assert_eq!(meter.assess(&good, &good_stats), Quality::ExactSame);
    assert_eq!(meter.assess(&bad, &bad_stats), Quality::MatchFail);
    assert_eq!(meter.assess(&good, &good_stats), Quality::MatchFail);
}

// ============================================================================
// Lattice
// ============================================================================

fn any_quality() -> impl Strategy<Value = Quality> {
    prop::sample::select(Quality::ALL.to_vec())
}

proptest! {
    #[test]
    fn consider_is_a_join(a in any_quality(), b in any_quality(), c in any_quality()) {
        prop_assert_eq!(a.consider(b), b.consider(a));
        prop_assert_eq!(a.consider(b).consider(c), a.consider(b.consider(c)));
        prop_assert_eq!(a.consider(a), a);
        prop_assert!(a.consider(b) >= a);
    }
}

#[cfg(feature = "serde")]
#[test]
fn thresholds_load_from_json() {
    let loaded: Thresholds = serde_json::from_str(r#"{"max_outlier_ratio":0.25}"#).unwrap();
    assert_eq!(loaded.max_outlier_ratio(), 0.25);
    assert_eq!(loaded.min_ordered_ratio(), 0.4);
    assert!(serde_json::from_str::<Thresholds>(r#"{"bit_hamming_ratio":3.0}"#).is_err());
}
