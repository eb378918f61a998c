//! src/settings.rs
//! Everything that tunes a comparison.

use bleach::BleachKind;
use matching::Sampling;
use partition::{Metrics, TreeSettings};
use quality::{Threshold, Thresholds};
use rolling::{Endian, HashRoller};

use crate::error::Error;

/// Knobs of one comparison pipeline.
///
/// The default is the production configuration: [`HashRoller::TamienHalfword`]
/// under [`Metrics::ShortRadial`], little endian, seeded sampling, healing on
/// and no bleaching.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComparisonSettings {
    /// Fingerprint configuration, shared by both sides.
    pub roller: HashRoller,
    /// Distance between fingerprints.
    pub metric: Metrics,
    /// Byte order of the words being fingerprinted.
    pub endian: Endian,
    /// Ratios of the damage meter.
    pub thresholds: Thresholds,
    /// Anchor sampling.
    pub sampling: Sampling,
    /// Metric tree construction.
    pub tree: TreeSettings,
    /// Whether gaps between seams are healed.
    pub heal: bool,
    /// Transforms applied to private copies of both buffers, in order.
    pub bleach: Vec<BleachKind>,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            roller: HashRoller::default(),
            metric: Metrics::default(),
            endian: Endian::default(),
            thresholds: Thresholds::default(),
            sampling: Sampling::default(),
            tree: TreeSettings::default(),
            heal: true,
            bleach: Vec::new(),
        }
    }
}

impl ComparisonSettings {
    /// Uses another roller.
    #[must_use]
    pub fn with_roller(mut self, roller: HashRoller) -> Self {
        self.roller = roller;
        self
    }

    /// Uses another metric.
    #[must_use]
    pub fn with_metric(mut self, metric: Metrics) -> Self {
        self.metric = metric;
        self
    }

    /// Reads words in `endian` order.
    #[must_use]
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Replaces all thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replaces one threshold.
    pub fn with_threshold(mut self, threshold: Threshold, value: f32) -> Result<Self, Error> {
        self.thresholds.set(threshold, value)?;
        Ok(self)
    }

    /// Seeds anchor sampling.
    #[must_use]
    pub fn with_sampling_seed(mut self, seed: u64) -> Self {
        self.sampling.seed = seed;
        self
    }

    /// Samples exactly `stitches` anchors, or the estimate for `None`.
    #[must_use]
    pub fn with_stitches(mut self, stitches: Option<usize>) -> Self {
        self.sampling.stitches = stitches;
        self
    }

    /// Seeds metric tree construction.
    #[must_use]
    pub fn with_tree_seed(mut self, seed: u64) -> Self {
        self.tree.seed = seed;
        self
    }

    /// Turns healing on or off.
    #[must_use]
    pub fn with_heal(mut self, heal: bool) -> Self {
        self.heal = heal;
        self
    }

    /// Appends a bleach.
    #[must_use]
    pub fn with_bleach(mut self, kind: BleachKind) -> Self {
        self.bleach.push(kind);
        self
    }
}
