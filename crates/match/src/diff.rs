//! crates/match/src/diff.rs
//! Seams of one modified buffer against an indexed original.
//!
//! Building a diff samples anchor fingerprints of the modified buffer, looks
//! each one up in the original's metric tree and turns runs of anchors that
//! agree on their drift into seams. The longest monotonic subsequence of the
//! matched indices tells main-sequence seams from displaced ones.

use logging::trace_seam;
use partition::{Lms, Metric};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rolling::{Fingerprints, HashRoller};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::base::{Sampling, SeamBase};
use crate::cost::Cost;
use crate::error::MatchError;
use crate::seam::{Hole, Seam};
use crate::seam_map::SeamMap;
use crate::span::Span;

mod heal;

/// Seams found between an original and a modified buffer.
///
/// `overall` holds every seam; `ordered` and `oo_order` split it by
/// main-sequence membership.
#[derive(Clone, Debug)]
pub struct SeamDiff {
    roller: HashRoller,
    ordered: SeamMap,
    oo_order: SeamMap,
    overall: SeamMap,
    anchors: Vec<usize>,
    matches: Vec<usize>,
    drifts: Vec<i64>,
    outliers: usize,
    base_cost: Cost,
    original_bytes: i64,
    modified_bytes: i64,
}

impl SeamDiff {
    #[cfg_attr(
        feature = "tracing",
        instrument(skip_all, name = "approximate", fields(fingerprints = modified.len()))
    )]
    pub(crate) fn build<M: Metric>(
        base: &SeamBase<M>,
        modified: &Fingerprints,
        sampling: &Sampling,
    ) -> Result<Self, MatchError> {
        let original = base.fingerprints();
        original.ensure_comparable(modified)?;

        let mut diff = Self {
            roller: base.roller(),
            ordered: SeamMap::new(),
            oo_order: SeamMap::new(),
            overall: SeamMap::new(),
            anchors: Vec::new(),
            matches: Vec::new(),
            drifts: Vec::new(),
            outliers: 0,
            base_cost: Cost::new(modified.byte_len() as u64),
            original_bytes: original.byte_len() as i64,
            modified_bytes: modified.byte_len() as i64,
        };

        let stitches = base.stitches_for(modified, sampling);
        diff.inquire(base, modified, stitches, sampling.seed);
        let seams = diff.group()?;
        diff.register(seams)?;

        trace_seam!(
            stitches,
            outliers = diff.outliers,
            ordered = diff.ordered.len(),
            displaced = diff.oo_order.len(),
            mapped = diff.base_cost.mapped(),
            "approximated"
        );
        Ok(diff)
    }

    /// Samples anchors and matches each against the tree, hinting with the
    /// previous drift.
    fn inquire<M: Metric>(
        &mut self,
        base: &SeamBase<M>,
        modified: &Fingerprints,
        stitches: usize,
        seed: u64,
    ) {
        let warm_up = modified.first_usable();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut anchors: Vec<usize> =
            rand::seq::index::sample(&mut rng, modified.usable_len(), stitches)
                .into_iter()
                .map(|offset| offset + warm_up)
                .collect();
        anchors.sort_unstable();

        let values = modified.values();
        let mut drift = 0i64;
        self.matches.reserve(anchors.len());
        self.drifts.reserve(anchors.len());
        for &anchor in &anchors {
            let hint = usize::try_from(anchor as i64 + drift).ok();
            let found = base.tree().nearest(values[anchor], hint);
            // A non-empty tree always yields a candidate.
            let matched = found.index().unwrap_or(anchor);
            drift = matched as i64 - anchor as i64;
            self.base_cost
                .record_mapping_costs(found.distance(), found.offered(), found.updated());
            self.matches.push(matched);
            self.drifts.push(drift);
        }
        self.anchors = anchors;
    }

    /// Turns runs of equal drift into seams; lone anchors are outliers.
    fn group(&mut self) -> Result<Vec<Seam>, MatchError> {
        let keys: Vec<i32> = self
            .matches
            .iter()
            .map(|&index| i32::try_from(index).unwrap_or(i32::MAX))
            .collect();
        let mut lms = Lms::with_capacity(keys.len());
        lms.solve(&keys)?;
        let growing = lms.membership();

        let step = self.roller.step_bytes() as u32;
        let mut seams = Vec::new();
        let mut first = 0;
        while first < self.anchors.len() {
            let drift = self.drifts[first];
            let mut last = first;
            while self.drifts.get(last + 1) == Some(&drift) {
                last += 1;
            }

            if last == first {
                self.outliers += 1;
            } else {
                // Nothing precedes the leading run, so it owns the warm-up bytes.
                let start = if seams.is_empty() && self.outliers == 0 {
                    0
                } else {
                    self.roller.window_start(self.anchors[first])
                };
                let end = self.roller.after_window(self.anchors[last]);
                let main = growing.get(first).copied().unwrap_or(false);
                seams.push(Seam::new(Span::new(start, end), step, drift, main));
            }
            first = last + 1;
        }
        Ok(seams)
    }

    /// Registers seams largest first, each trimmed to bytes still free, then
    /// clips counterparts to the original buffer.
    fn register(&mut self, mut seams: Vec<Seam>) -> Result<(), MatchError> {
        seams.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start().cmp(&b.start())));
        for seam in seams {
            let unique = self.overall.trim_to_unique(seam.span());
            if !unique.is_empty() {
                self.overall.insert(seam.with_span(unique))?;
            }
        }

        let mut clipped = SeamMap::new();
        for mut seam in self.overall.take_sorted() {
            seam.trim_inverse_to(0, self.original_bytes);
            if clipped.insert(seam)? {
                self.base_cost.record_mapped_bytes(seam.len() as u64);
            }
        }
        self.replace_seams(clipped.take_sorted())
    }

    /// Rebuilds all three maps from `seams`.
    pub(crate) fn replace_seams(&mut self, seams: Vec<Seam>) -> Result<(), MatchError> {
        self.ordered = SeamMap::new();
        self.oo_order = SeamMap::new();
        self.overall = SeamMap::new();
        for seam in seams {
            if self.overall.insert(seam)? {
                if seam.is_main_sequence() {
                    self.ordered.insert(seam)?;
                } else {
                    self.oo_order.insert(seam)?;
                }
            }
        }
        Ok(())
    }

    /// Main-sequence seams.
    #[must_use]
    pub const fn ordered(&self) -> &SeamMap {
        &self.ordered
    }

    /// Displaced seams.
    #[must_use]
    pub const fn oo_order(&self) -> &SeamMap {
        &self.oo_order
    }

    /// Every seam.
    #[must_use]
    pub const fn overall(&self) -> &SeamMap {
        &self.overall
    }

    /// Roller both sides were fingerprinted with.
    #[must_use]
    pub const fn roller(&self) -> HashRoller {
        self.roller
    }

    /// Number of sampled anchors.
    #[must_use]
    pub fn stitch_count(&self) -> usize {
        self.anchors.len()
    }

    /// Anchors whose drift no neighbor shared.
    #[must_use]
    pub const fn outlier_count(&self) -> usize {
        self.outliers
    }

    /// Sampled fingerprint indices of the modified buffer, ascending.
    #[must_use]
    pub fn anchors(&self) -> &[usize] {
        &self.anchors
    }

    /// Original fingerprint index matched by each anchor.
    #[must_use]
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Drift in steps of each anchor.
    #[must_use]
    pub fn drifts(&self) -> &[i64] {
        &self.drifts
    }

    /// Cost of sampling and registration.
    #[must_use]
    pub const fn base_cost(&self) -> &Cost {
        &self.base_cost
    }

    /// Fresh counters sized for the modified buffer.
    #[must_use]
    pub const fn new_blank_cost(&self) -> Cost {
        Cost::new(self.modified_bytes as u64)
    }

    /// Bytes of the original covered by its fingerprints.
    #[must_use]
    pub const fn original_bytes(&self) -> i64 {
        self.original_bytes
    }

    /// Bytes of the modified buffer covered by its fingerprints.
    #[must_use]
    pub const fn modified_bytes(&self) -> i64 {
        self.modified_bytes
    }

    /// Seam covering `address` of the modified buffer.
    #[must_use]
    pub fn covering(&self, address: i64) -> Option<&Seam> {
        self.overall.covering(address)
    }

    /// Gaps around and between main-sequence seams, head and tail included.
    #[must_use]
    pub fn holes(&self) -> Vec<Hole> {
        let mut holes = Vec::with_capacity(self.ordered.len() + 1);
        let (mut current, mut inverse) = (0, 0);
        for seam in &self.ordered {
            let counterpart = seam.inverse();
            holes.push(Hole::new(
                Span::new(current, seam.start().max(current)),
                Span::new(inverse, counterpart.start().max(inverse)),
            ));
            current = seam.end();
            inverse = counterpart.end();
        }
        holes.push(Hole::new(
            Span::new(current, self.modified_bytes.max(current)),
            Span::new(inverse, self.original_bytes.max(inverse)),
        ));
        holes
    }
}

#[cfg(test)]
mod tests {
    use partition::{Metrics, TreeSettings};
    use rolling::Endian;
    use test_support::code_like;

    use super::*;

    fn base(bytes: &[u8]) -> SeamBase {
        SeamBase::index(
            bytes,
            HashRoller::TamienHalfword,
            Endian::Little,
            Metrics::ShortRadial,
            &TreeSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn identical_buffers_give_one_seam() {
        let bytes = code_like(7, 4096);
        let base = base(&bytes);
        let modified = HashRoller::TamienHalfword.index(&bytes, Endian::Little);
        let mut diff = base.approximate(&modified, &Sampling::default()).unwrap();
        assert_eq!(diff.overall().len(), 1);
        assert_eq!(diff.outlier_count(), 0);
        assert!(diff.drifts().iter().all(|&drift| drift == 0));

        let healing = diff.heal(&bytes, &bytes).unwrap();
        let seam = diff.ordered().first().copied().unwrap();
        assert_eq!(seam.span(), Span::new(0, 4096));
        assert_eq!(seam.drift(), 0);
        assert_eq!(diff.base_cost().mapped() + healing.mapped(), 4096);
    }

    #[test]
    fn maps_partition_overall() {
        let bytes = code_like(9, 2048);
        let mut shifted = bytes[512..].to_vec();
        shifted.extend_from_slice(&bytes[..512]);
        let base = base(&bytes);
        let modified = HashRoller::TamienHalfword.index(&shifted, Endian::Little);
        let diff = base.approximate(&modified, &Sampling::default()).unwrap();
        assert_eq!(
            diff.ordered().len() + diff.oo_order().len(),
            diff.overall().len()
        );
        for seam in diff.overall() {
            let owner = if seam.is_main_sequence() {
                diff.ordered()
            } else {
                diff.oo_order()
            };
            assert_eq!(owner.covering(seam.start()), Some(seam));
        }
    }

    #[test]
    fn sampling_is_reproducible() {
        let bytes = code_like(3, 4096);
        let other = code_like(4, 4096);
        let base = base(&bytes);
        let modified = HashRoller::TamienHalfword.index(&other, Endian::Little);
        let a = base.approximate(&modified, &Sampling::with_seed(5)).unwrap();
        let b = base.approximate(&modified, &Sampling::with_seed(5)).unwrap();
        assert_eq!(a.anchors(), b.anchors());
        assert_eq!(a.matches(), b.matches());
        assert_eq!(a.overall(), b.overall());
    }

    #[test]
    fn rollers_must_agree() {
        let bytes = code_like(1, 1024);
        let base = base(&bytes);
        let modified = HashRoller::TamienWord.index(&bytes, Endian::Little);
        let err = base.approximate(&modified, &Sampling::default()).unwrap_err();
        assert!(matches!(err, MatchError::Rolling(_)));
    }

    #[test]
    fn holes_of_identical_buffers_are_stitches() {
        let bytes = code_like(2, 1024);
        let base = base(&bytes);
        let modified = HashRoller::TamienHalfword.index(&bytes, Endian::Little);
        let mut diff = base.approximate(&modified, &Sampling::default()).unwrap();
        diff.heal(&bytes, &bytes).unwrap();
        let holes = diff.holes();
        assert_eq!(holes.len(), 2);
        assert!(holes.iter().all(Hole::is_pure_stitch));
    }
}
