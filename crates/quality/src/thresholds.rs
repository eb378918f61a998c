//! crates/quality/src/thresholds.rs
//! Tunable ratios of the damage meter.

use std::fmt;
use std::str::FromStr;

use crate::error::ThresholdError;

/// Names of the four ratios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Threshold {
    /// Share of sampled anchors allowed to be outliers.
    MaxOutlier,
    /// Share of the longer buffer the main sequence must cover.
    MinGrowing,
    /// Share of compared bytes allowed to differ.
    MaxHamming,
    /// Share of compared bits allowed to differ.
    BitHamming,
}

impl Threshold {
    /// Every threshold.
    pub const ALL: [Self; 4] = [
        Self::MaxOutlier,
        Self::MinGrowing,
        Self::MaxHamming,
        Self::BitHamming,
    ];

    /// Name used in assignments such as `max_outlier=0.25`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MaxOutlier => "max_outlier",
            Self::MinGrowing => "min_growing",
            Self::MaxHamming => "max_hamming",
            Self::BitHamming => "bit_hamming",
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Threshold {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|threshold| threshold.name() == wanted)
            .ok_or_else(|| ThresholdError::UnknownThreshold(s.to_owned()))
    }
}

/// Ratios deciding when a diff stops being a match.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawThresholds"))]
pub struct Thresholds {
    max_outlier_ratio: f32,
    min_ordered_ratio: f32,
    max_hamming_ratio: f32,
    bit_hamming_ratio: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_outlier_ratio: 0.5,
            min_ordered_ratio: 0.4,
            max_hamming_ratio: 0.9,
            bit_hamming_ratio: 0.3,
        }
    }
}

fn check(threshold: Threshold, value: f32) -> Result<f32, ThresholdError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ThresholdError::OutOfRange { threshold, value })
    }
}

impl Thresholds {
    /// Validated ratios, in [`Threshold::ALL`] order.
    ///
    /// # Errors
    ///
    /// [`ThresholdError::OutOfRange`] for a ratio outside `[0, 1]`.
    pub fn new(
        max_outlier_ratio: f32,
        min_ordered_ratio: f32,
        max_hamming_ratio: f32,
        bit_hamming_ratio: f32,
    ) -> Result<Self, ThresholdError> {
        Ok(Self {
            max_outlier_ratio: check(Threshold::MaxOutlier, max_outlier_ratio)?,
            min_ordered_ratio: check(Threshold::MinGrowing, min_ordered_ratio)?,
            max_hamming_ratio: check(Threshold::MaxHamming, max_hamming_ratio)?,
            bit_hamming_ratio: check(Threshold::BitHamming, bit_hamming_ratio)?,
        })
    }

    /// Allowed outliers per sampled anchor.
    #[must_use]
    pub const fn max_outlier_ratio(&self) -> f32 {
        self.max_outlier_ratio
    }

    /// Required main-sequence coverage of the longer buffer.
    #[must_use]
    pub const fn min_ordered_ratio(&self) -> f32 {
        self.min_ordered_ratio
    }

    /// Allowed differing bytes per compared byte.
    #[must_use]
    pub const fn max_hamming_ratio(&self) -> f32 {
        self.max_hamming_ratio
    }

    /// Allowed differing bits per compared bit.
    #[must_use]
    pub const fn bit_hamming_ratio(&self) -> f32 {
        self.bit_hamming_ratio
    }

    /// Value of one threshold.
    #[must_use]
    pub const fn get(&self, threshold: Threshold) -> f32 {
        match threshold {
            Threshold::MaxOutlier => self.max_outlier_ratio,
            Threshold::MinGrowing => self.min_ordered_ratio,
            Threshold::MaxHamming => self.max_hamming_ratio,
            Threshold::BitHamming => self.bit_hamming_ratio,
        }
    }

    /// Replaces one threshold.
    ///
    /// # Errors
    ///
    /// [`ThresholdError::OutOfRange`]; `self` is unchanged.
    pub fn set(&mut self, threshold: Threshold, value: f32) -> Result<(), ThresholdError> {
        let value = check(threshold, value)?;
        match threshold {
            Threshold::MaxOutlier => self.max_outlier_ratio = value,
            Threshold::MinGrowing => self.min_ordered_ratio = value,
            Threshold::MaxHamming => self.max_hamming_ratio = value,
            Threshold::BitHamming => self.bit_hamming_ratio = value,
        }
        Ok(())
    }

    /// Applies a `name=ratio` assignment.
    ///
    /// # Errors
    ///
    /// [`ThresholdError::InvalidAssignment`] when the text is not an
    /// assignment of a number, otherwise as [`set`](Self::set).
    pub fn apply(&mut self, assignment: &str) -> Result<(), ThresholdError> {
        let invalid = || ThresholdError::InvalidAssignment(assignment.to_owned());
        let (name, value) = assignment.split_once('=').ok_or_else(invalid)?;
        let threshold = name.parse()?;
        let value = value.trim().parse::<f32>().map_err(|_| invalid())?;
        self.set(threshold, value)
    }

    /// Builder form of [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// As [`set`](Self::set).
    pub fn with(mut self, threshold: Threshold, value: f32) -> Result<Self, ThresholdError> {
        self.set(threshold, value)?;
        Ok(self)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawThresholds {
    max_outlier_ratio: f32,
    min_ordered_ratio: f32,
    max_hamming_ratio: f32,
    bit_hamming_ratio: f32,
}

#[cfg(feature = "serde")]
impl Default for RawThresholds {
    fn default() -> Self {
        let defaults = Thresholds::default();
        Self {
            max_outlier_ratio: defaults.max_outlier_ratio,
            min_ordered_ratio: defaults.min_ordered_ratio,
            max_hamming_ratio: defaults.max_hamming_ratio,
            bit_hamming_ratio: defaults.bit_hamming_ratio,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawThresholds> for Thresholds {
    type Error = ThresholdError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(
            raw.max_outlier_ratio,
            raw.min_ordered_ratio,
            raw.max_hamming_ratio,
            raw.bit_hamming_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = Thresholds::default();
        assert_eq!(t.max_outlier_ratio(), 0.5);
        assert_eq!(t.min_ordered_ratio(), 0.4);
        assert_eq!(t.max_hamming_ratio(), 0.9);
        assert_eq!(t.bit_hamming_ratio(), 0.3);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(Thresholds::new(1.5, 0.4, 0.9, 0.3).is_err());
        assert!(Thresholds::new(0.5, -0.1, 0.9, 0.3).is_err());
        assert!(Thresholds::new(0.5, 0.4, f32::NAN, 0.3).is_err());
        assert!(Thresholds::new(0.0, 1.0, 0.0, 1.0).is_ok());
    }

    #[test]
    fn apply_assignments() {
        let mut t = Thresholds::default();
        t.apply("max-outlier=0.25").unwrap();
        t.apply("bit_hamming = 0.1").unwrap();
        assert_eq!(t.get(Threshold::MaxOutlier), 0.25);
        assert_eq!(t.get(Threshold::BitHamming), 0.1);
        assert_eq!(
            t.apply("min_growing"),
            Err(ThresholdError::InvalidAssignment("min_growing".into()))
        );
        assert!(matches!(
            t.apply("nonsense=0.1"),
            Err(ThresholdError::UnknownThreshold(_))
        ));
        assert!(matches!(
            t.apply("max_hamming=2"),
            Err(ThresholdError::OutOfRange { .. })
        ));
        assert_eq!(t.max_hamming_ratio(), 0.9);
    }
}
