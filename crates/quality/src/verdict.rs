//! crates/quality/src/verdict.rs
//! The quality lattice.

use std::fmt;

/// Something that only ever gets worse as evidence is considered.
pub trait Considerable: Sized {
    /// The worse of `self` and `consideration`.
    #[must_use]
    fn consider(self, consideration: Self) -> Self;
}

/// How well two ranges correlate, from best to worst.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Quality {
    /// Byte for byte the same.
    #[default]
    ExactSame,
    /// Bytes changed in place, nothing moved.
    PlaceSame,
    /// Aligned at both ends, shifted in between.
    PlaceVary,
    /// Shifted by one constant amount.
    DriftSame,
    /// Same shift at both ends, different in between.
    DriftVary,
    /// The shift accumulates along the range.
    DriftAway,
    /// No usable correlation.
    MatchFail,
}

impl Quality {
    /// Every verdict, best first.
    pub const ALL: [Self; 7] = [
        Self::ExactSame,
        Self::PlaceSame,
        Self::PlaceVary,
        Self::DriftSame,
        Self::DriftVary,
        Self::DriftAway,
        Self::MatchFail,
    ];

    /// Anything but [`Quality::MatchFail`].
    #[must_use]
    pub const fn is_good(self) -> bool {
        !matches!(self, Self::MatchFail)
    }

    /// Rank, zero for the best verdict.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Sentence describing the verdict.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ExactSame => "Contents are identical.",
            Self::PlaceSame => "In-place content changes but no skew detected.",
            Self::PlaceVary => "Zero skew near start and end, but varies in between.",
            Self::DriftSame => "Contents are skewed along at a constant skew.",
            Self::DriftVary => "Same skew near start and end, but varies in between.",
            Self::DriftAway => "Insertions or deletions cause skew to accumulate.",
            Self::MatchFail => "Cannot correlate contents at all.",
        }
    }
}

impl Considerable for Quality {
    fn consider(self, consideration: Self) -> Self {
        self.max(consideration)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rank(), self.description())
    }
}

/// Running join of considered values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Aggregator<Q> {
    current: Q,
}

impl<Q: Considerable + Copy> Aggregator<Q> {
    /// Starts from `initial`.
    #[must_use]
    pub const fn new(initial: Q) -> Self {
        Self { current: initial }
    }

    /// Folds `consideration` in and returns the result.
    pub fn consider(&mut self, consideration: Q) -> Q {
        self.current = self.current.consider(consideration);
        self.current
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> Q {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consider_never_improves() {
        let mut aggregator = Aggregator::new(Quality::ExactSame);
        assert_eq!(aggregator.consider(Quality::DriftSame), Quality::DriftSame);
        assert_eq!(aggregator.consider(Quality::PlaceSame), Quality::DriftSame);
        assert_eq!(aggregator.consider(Quality::MatchFail), Quality::MatchFail);
        assert_eq!(aggregator.consider(Quality::ExactSame), Quality::MatchFail);
    }

    #[test]
    fn display_carries_rank() {
        assert_eq!(Quality::ExactSame.to_string(), "0 (Contents are identical.)");
        assert_eq!(
            Quality::MatchFail.to_string(),
            "6 (Cannot correlate contents at all.)"
        );
    }

    #[test]
    fn only_match_fail_is_bad() {
        let good: Vec<bool> = Quality::ALL.iter().map(|q| q.is_good()).collect();
        assert_eq!(good, [true, true, true, true, true, true, false]);
    }
}
