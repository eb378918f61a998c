//! crates/quality/src/error.rs

use thiserror::Error;

use crate::thresholds::Threshold;

/// Rejected threshold settings.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ThresholdError {
    /// Ratios must lie in `[0, 1]`.
    #[error("{threshold} must be within [0, 1], got {value}")]
    OutOfRange {
        /// Offending threshold.
        threshold: Threshold,
        /// Rejected value.
        value: f32,
    },
    /// The name matches no threshold.
    #[error("unknown threshold '{0}'")]
    UnknownThreshold(String),
    /// The assignment is not `name=ratio`.
    #[error("invalid threshold assignment '{0}'")]
    InvalidAssignment(String),
}
