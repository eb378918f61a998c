//! crates/match/src/seam.rs
//! Correlated byte ranges and the gaps between them.

use std::fmt;

use crate::span::Span;

/// A byte range of the modified buffer that corresponds to a range of the
/// original buffer shifted by a whole number of steps.
///
/// The modified byte at `p` is paired with the original byte at
/// `p + translation()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seam {
    span: Span,
    step: u32,
    drift: i64,
    main_sequence: bool,
}

impl Seam {
    /// Creates a seam over `span` drifting by `drift` steps of `step` bytes.
    #[must_use]
    pub const fn new(span: Span, step: u32, drift: i64, main_sequence: bool) -> Self {
        Self {
            span,
            step,
            drift,
            main_sequence,
        }
    }

    /// Covered range of the modified buffer.
    #[inline]
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// First covered byte.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.span.start
    }

    /// One past the last covered byte.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.span.end
    }

    /// Covered bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> i64 {
        self.span.len()
    }

    /// Returns `true` when nothing is covered.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Bytes per step.
    #[inline]
    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Offset in steps.
    #[inline]
    #[must_use]
    pub const fn drift(&self) -> i64 {
        self.drift
    }

    /// Offset in bytes.
    #[inline]
    #[must_use]
    pub const fn translation(&self) -> i64 {
        self.drift * self.step as i64
    }

    /// Whether the seam belongs to the monotonic main sequence.
    #[inline]
    #[must_use]
    pub const fn is_main_sequence(&self) -> bool {
        self.main_sequence
    }

    /// Returns `true` when `address` of the modified buffer is covered.
    #[inline]
    #[must_use]
    pub const fn contains(&self, address: i64) -> bool {
        self.span.contains(address)
    }

    /// The counterpart range in the original buffer, drifting back.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        Self::new(
            self.span.translate(self.translation()),
            self.step,
            -self.drift,
            self.main_sequence,
        )
    }

    /// Same drift over another range.
    #[must_use]
    pub const fn with_span(&self, span: Span) -> Self {
        Self::new(span, self.step, self.drift, self.main_sequence)
    }

    /// Moves the start, keeping the end.
    pub const fn set_start(&mut self, start: i64) {
        self.span.start = start;
    }

    /// Moves the end, keeping the start.
    pub const fn set_end(&mut self, end: i64) {
        self.span.end = end;
    }

    /// Shrinks the seam so its counterpart lies inside `[start, start + len)`
    /// of the original buffer.
    pub fn trim_inverse_to(&mut self, start: i64, len: i64) {
        let allowed = Span::new(start, start + len).translate(-self.translation());
        self.span = self
            .span
            .intersect(&allowed)
            .unwrap_or(Span::new(self.span.start, self.span.start));
    }
}

impl fmt::Display for Seam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = if self.main_sequence { "" } else { "~" };
        match self.translation() {
            0 => write!(f, "{}[{order}==]", self.span),
            t => write!(f, "{}[{order}{t:+}]", self.span),
        }
    }
}

/// The unmatched bytes between two seams, seen from both buffers.
///
/// `current` is a range of the modified buffer, `inverse` the matching range
/// of the original buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hole {
    current: Span,
    inverse: Span,
}

impl Hole {
    /// Pairs a modified range with an original range.
    #[must_use]
    pub const fn new(current: Span, inverse: Span) -> Self {
        Self { current, inverse }
    }

    /// Range of the modified buffer.
    #[must_use]
    pub const fn current(&self) -> Span {
        self.current
    }

    /// Range of the original buffer.
    #[must_use]
    pub const fn inverse_span(&self) -> Span {
        self.inverse
    }

    /// The same hole seen from the original buffer.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        Self::new(self.inverse, self.current)
    }

    /// Nothing of the original is missing here.
    #[must_use]
    pub const fn is_pure_insert(&self) -> bool {
        self.inverse.is_empty()
    }

    /// Nothing was added to the modified buffer here.
    #[must_use]
    pub const fn is_pure_delete(&self) -> bool {
        self.current.is_empty()
    }

    /// Both sides are empty: the seams simply meet.
    #[must_use]
    pub const fn is_pure_stitch(&self) -> bool {
        self.is_pure_insert() && self.is_pure_delete()
    }

    /// Some modified bytes are unmatched.
    #[must_use]
    pub const fn is_some_insert(&self) -> bool {
        !self.current.is_empty()
    }

    /// Some original bytes are unmatched.
    #[must_use]
    pub const fn is_some_delete(&self) -> bool {
        !self.inverse.is_empty()
    }

    /// At least one side holds bytes.
    #[must_use]
    pub const fn is_nontrivial(&self) -> bool {
        !self.is_pure_stitch()
    }
}

impl fmt::Display for Hole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <> {}", self.current, self.inverse)
    }
}
