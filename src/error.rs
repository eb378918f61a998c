//! src/error.rs

use matching::MatchError;
use quality::ThresholdError;
use thiserror::Error;

/// Failures of the comparison pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Seam building or healing broke a contract.
    #[error("matching failed: {0}")]
    Match(#[from] MatchError),
    /// A threshold setting was rejected.
    #[error("invalid thresholds: {0}")]
    Threshold(#[from] ThresholdError),
}
