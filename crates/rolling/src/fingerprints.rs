//! crates/rolling/src/fingerprints.rs
//! Immutable fingerprint sequences.

use std::ops::Range;
use std::sync::Arc;

use crate::error::RollingError;
use crate::roller::HashRoller;

/// Fingerprints of one buffer plus the roller that produced them.
///
/// The values live behind an [`Arc`] so an index built over them and any
/// number of concurrent comparisons can share one allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fingerprints {
    algorithm: HashRoller,
    values: Arc<[u64]>,
}

impl Fingerprints {
    /// Wraps precomputed values.
    #[must_use]
    pub const fn new(algorithm: HashRoller, values: Arc<[u64]>) -> Self {
        Self { algorithm, values }
    }

    /// Roller that produced the sequence.
    #[inline]
    #[must_use]
    pub const fn algorithm(&self) -> HashRoller {
        self.algorithm
    }

    /// All values, warm-up included.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Shared handle to all values.
    #[must_use]
    pub fn shared(&self) -> Arc<[u64]> {
        Arc::clone(&self.values)
    }

    /// Number of values, warm-up included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no value was produced.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First index whose window was fully populated.
    #[inline]
    #[must_use]
    pub const fn first_usable(&self) -> usize {
        self.algorithm.warm_up_steps()
    }

    /// Index range of usable fingerprints; empty for short buffers.
    #[must_use]
    pub fn usable_range(&self) -> Range<usize> {
        self.first_usable().min(self.len())..self.len()
    }

    /// Usable fingerprints.
    #[must_use]
    pub fn usable(&self) -> &[u64] {
        &self.values[self.usable_range()]
    }

    /// Number of usable fingerprints.
    #[must_use]
    pub fn usable_len(&self) -> usize {
        self.usable_range().len()
    }

    /// Returns `true` when `index` addresses a usable fingerprint.
    #[inline]
    #[must_use]
    pub fn is_usable(&self, index: i64) -> bool {
        usize::try_from(index).is_ok_and(|i| self.usable_range().contains(&i))
    }

    /// Bytes covered by usable windows: from byte 0 to the end of the last
    /// window.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        if self.usable_len() == 0 {
            return 0;
        }
        usize::try_from(self.algorithm.after_window(self.len() - 1)).unwrap_or(0)
    }

    /// Checks the roller's geometry.
    pub const fn check_invariants(&self) -> Result<(), RollingError> {
        self.algorithm.check_geometry()
    }

    /// Fails unless `self` and `other` were produced by the same roller.
    pub fn ensure_comparable(&self, other: &Self) -> Result<(), RollingError> {
        ensure_same_algorithm(self.algorithm, other.algorithm)
    }
}

/// Fails unless both rollers are the same configuration.
pub fn ensure_same_algorithm(left: HashRoller, right: HashRoller) -> Result<(), RollingError> {
    if left == right {
        Ok(())
    } else {
        Err(RollingError::AlgorithmMismatch { left, right })
    }
}
