/// Errors raised while building a [`MetricTree`](crate::MetricTree).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// No point lies in the requested range.
    #[error("cannot index an empty range: first point {first} of {len} values")]
    Empty {
        /// First absolute index requested.
        first: usize,
        /// Number of values in the source.
        len: usize,
    },
}

/// Errors raised by the [`Lms`](crate::Lms) solver.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LmsError {
    /// The input does not fit the preallocated scratch space.
    #[error("input of {len} values exceeds solver capacity {capacity}")]
    CapacityExceeded {
        /// Input length.
        len: usize,
        /// Solver capacity.
        capacity: usize,
    },
}
