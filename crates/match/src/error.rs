//! crates/match/src/error.rs
//! Errors raised while building or healing a seam diff.

use partition::{LmsError, TreeError};
use rolling::RollingError;
use thiserror::Error;

use crate::seam::Seam;

/// Contract violations that abort a comparison.
///
/// Buffers that do not correlate are not an error; they produce a diff with
/// few seams and many outliers.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The two fingerprint sequences come from different rollers.
    #[error(transparent)]
    Rolling(#[from] RollingError),
    /// The original buffer has no usable fingerprint.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The monotonic solver was undersized.
    #[error(transparent)]
    Lms(#[from] LmsError),
    /// A seam overlaps one already registered.
    #[error("seam {seam} overlaps registered seam {existing}")]
    OverlappingSeam {
        /// Seam being inserted.
        seam: Seam,
        /// Seam already in the map.
        existing: Seam,
    },
    /// Two seams were asked to meet although they already overlap.
    #[error("cannot fasten {prev} to {next}: gap of {gap} bytes")]
    NegativeGap {
        /// Lower seam.
        prev: Seam,
        /// Upper seam.
        next: Seam,
        /// `next.start - prev.end`.
        gap: i64,
    },
}
