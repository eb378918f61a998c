//! crates/match/src/base.rs
//! Indexed original buffer, shared by every comparison against it.

use partition::{Metric, Metrics, MetricTree, TreeSettings};
use rolling::{Endian, Fingerprints, HashRoller};

use crate::diff::SeamDiff;
use crate::error::MatchError;

/// How anchors are drawn from the modified fingerprints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sampling {
    /// Seed of the anchor generator.
    pub seed: u64,
    /// Fixed anchor count; [`stitch_estimate`] when `None`.
    pub stitches: Option<usize>,
}

impl Sampling {
    /// Sampling with a given seed and the estimated anchor count.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            stitches: None,
        }
    }
}

/// `floor(log2(n * 3 / 2))`, zero for tiny inputs.
const fn rounded_log2(n: usize) -> u32 {
    match (n.saturating_mul(3) / 2).checked_ilog2() {
        Some(log) => log,
        None => 0,
    }
}

/// Anchor count for sequences of `original` and `modified` fingerprints.
///
/// About four times the fourth root of the product, rounded to a power of
/// two.
///
/// ```
/// assert_eq!(matching::stitch_estimate(4096, 4096), 256);
/// assert_eq!(matching::stitch_estimate(8192, 2048), 256);
/// ```
#[must_use]
pub const fn stitch_estimate(original: usize, modified: usize) -> usize {
    let exponent = (rounded_log2(original) + rounded_log2(modified)) / 4 + 2;
    1 << exponent
}

/// Fingerprints of an original buffer and the metric tree over them.
///
/// Immutable once built; any number of modified buffers can be compared
/// against it, from several threads if needed.
#[derive(Clone, Debug)]
pub struct SeamBase<M = Metrics> {
    fingerprints: Fingerprints,
    tree: MetricTree<M>,
}

impl<M: Metric> SeamBase<M> {
    /// Indexes already computed fingerprints.
    ///
    /// # Errors
    ///
    /// [`MatchError::Rolling`] for a roller with broken geometry and
    /// [`MatchError::Tree`] when no fingerprint is usable.
    pub fn new(
        fingerprints: Fingerprints,
        metric: M,
        settings: &TreeSettings,
    ) -> Result<Self, MatchError> {
        fingerprints.check_invariants()?;
        let tree = MetricTree::new(
            fingerprints.shared(),
            fingerprints.first_usable(),
            metric,
            settings,
        )?;
        Ok(Self { fingerprints, tree })
    }

    /// Fingerprints `original` with `roller` and indexes the result.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new); buffers shorter than one window fail with
    /// [`MatchError::Tree`].
    pub fn index(
        original: &[u8],
        roller: HashRoller,
        endian: Endian,
        metric: M,
        settings: &TreeSettings,
    ) -> Result<Self, MatchError> {
        Self::new(roller.index(original, endian), metric, settings)
    }

    /// Fingerprints of the original buffer.
    #[must_use]
    pub const fn fingerprints(&self) -> &Fingerprints {
        &self.fingerprints
    }

    /// Nearest neighbor index.
    #[must_use]
    pub const fn tree(&self) -> &MetricTree<M> {
        &self.tree
    }

    /// Roller the fingerprints came from.
    #[must_use]
    pub const fn roller(&self) -> HashRoller {
        self.fingerprints.algorithm()
    }

    /// Anchor count for `modified`, clamped to what both sides can supply.
    #[must_use]
    pub fn stitches_for(&self, modified: &Fingerprints, sampling: &Sampling) -> usize {
        sampling
            .stitches
            .unwrap_or_else(|| stitch_estimate(self.fingerprints.len(), modified.len()))
            .min(self.fingerprints.usable_len())
            .min(modified.usable_len())
    }

    /// Locates the seams of `modified` against the original.
    ///
    /// # Errors
    ///
    /// [`MatchError::Rolling`] when `modified` was fingerprinted by another
    /// roller, [`MatchError::OverlappingSeam`] if registration breaks the
    /// map.
    pub fn approximate(
        &self,
        modified: &Fingerprints,
        sampling: &Sampling,
    ) -> Result<SeamDiff, MatchError> {
        SeamDiff::build(self, modified, sampling)
    }
}
