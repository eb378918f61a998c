//! crates/quality/src/meter.rs
//! Ranking a diff against the thresholds.

use logging::trace_quality;
use matching::SeamDiff;

use crate::stat::HammingStat;
use crate::thresholds::Thresholds;
use crate::verdict::{Aggregator, Quality};

/// Grades diffs; verdicts accumulate across assessments.
#[derive(Clone, Debug)]
pub struct DamageMeter {
    thresholds: Thresholds,
    verdict: Aggregator<Quality>,
}

impl DamageMeter {
    /// Meter starting at [`Quality::ExactSame`].
    #[must_use]
    pub const fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            verdict: Aggregator::new(Quality::ExactSame),
        }
    }

    /// Ratios in use.
    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Worst verdict so far.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.verdict.get()
    }

    /// Grades `diff` and folds the result into the running verdict.
    ///
    /// Checks run in a fixed order: emptiness, outliers, translation of the
    /// main sequence along its length, main-sequence coverage, unmatched
    /// length, then byte and bit mismatches.
    pub fn assess(&mut self, diff: &SeamDiff, stats: &HammingStat) -> Quality {
        let t = self.thresholds;
        let v = &mut self.verdict;

        if diff.overall().is_empty() {
            v.consider(Quality::MatchFail);
            trace_quality!(quality = %v.get(), "nothing matched");
            return v.get();
        }

        if diff.outlier_count() as f32 > diff.stitch_count() as f32 * t.max_outlier_ratio() {
            v.consider(Quality::MatchFail);
        }

        let ordered = diff.ordered();
        if let Some(first) = ordered.first() {
            let drift_start = first.translation();
            let mut drift_after = drift_start;
            if drift_start != 0 {
                v.consider(Quality::DriftSame);
            }
            for seam in ordered {
                drift_after = seam.translation();
                if drift_after != drift_start {
                    v.consider(if drift_start == 0 {
                        Quality::PlaceVary
                    } else {
                        Quality::DriftVary
                    });
                }
            }
            if drift_after != drift_start {
                v.consider(Quality::DriftAway);
            }
        }

        let total_ordered = ordered.covered_bytes();
        let unique_length = stats.control().unique();
        let longer_length = stats.longer_length();
        if (total_ordered as f32) < longer_length as f32 {
            if (total_ordered as f32) < longer_length as f32 * t.min_ordered_ratio() {
                v.consider(Quality::MatchFail);
            } else {
                v.consider(Quality::PlaceVary);
            }
        }
        if unique_length != 0 {
            v.consider(Quality::DriftVary);
        }

        let hamming = stats.overall();
        let octets = hamming.octets();
        if octets > 0 {
            v.consider(Quality::PlaceSame);
            let common = hamming.common();
            if octets as f32 > common as f32 * t.max_hamming_ratio() {
                v.consider(Quality::MatchFail);
            }
            if hamming.digits() as f32 > (common * 8) as f32 * t.bit_hamming_ratio() {
                v.consider(Quality::MatchFail);
            }
        }

        trace_quality!(
            quality = %v.get(),
            outliers = diff.outlier_count(),
            ordered = total_ordered,
            octets,
            "assessed"
        );
        v.get()
    }
}

impl Default for DamageMeter {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}
