use crate::HashRoller;

/// Errors raised when fingerprint sequences are combined incorrectly.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RollingError {
    /// Two sequences produced by different rollers were compared.
    #[error("fingerprints from {left} cannot be compared with fingerprints from {right}")]
    AlgorithmMismatch {
        /// Roller of the first sequence.
        left: HashRoller,
        /// Roller of the second sequence.
        right: HashRoller,
    },
    /// The roller's warm-up does not end exactly one window into the buffer.
    #[error("{roller} warm-up of {warm_up} steps does not end at its {window}-step window")]
    MisalignedWarmUp {
        /// Offending roller.
        roller: HashRoller,
        /// Warm-up length in steps.
        warm_up: usize,
        /// Window length in steps.
        window: usize,
    },
}
