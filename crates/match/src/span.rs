//! crates/match/src/span.rs
//! Half-open byte ranges.

use std::fmt;

/// Half-open byte range `[start, end)`.
///
/// Addresses are signed so that translated ranges can temporarily fall below
/// zero before they are trimmed back into a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// First byte.
    pub start: i64,
    /// One past the last byte.
    pub end: i64,
}

impl Span {
    /// Creates `[start, end)`.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Span covering `len` bytes from zero.
    #[must_use]
    pub const fn of_len(len: usize) -> Self {
        Self::new(0, len as i64)
    }

    /// Number of bytes; zero for inverted spans.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> i64 {
        if self.end > self.start {
            self.end - self.start
        } else {
            0
        }
    }

    /// Returns `true` when no byte is covered.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns `true` when `address` lies inside.
    #[inline]
    #[must_use]
    pub const fn contains(&self, address: i64) -> bool {
        self.start <= address && address < self.end
    }

    /// Returns `true` when both spans share at least one byte.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Shifts both bounds by `delta`.
    #[inline]
    #[must_use]
    pub const fn translate(&self, delta: i64) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }

    /// Common part of both spans, `None` when they are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let common = Self::new(self.start.max(other.start), self.end.min(other.end));
        (!common.is_empty()).then_some(common)
    }

    /// Removes `other` from `self`.
    ///
    /// When `other` lies strictly inside, the longer remaining side is kept
    /// (the lower one on ties) so the result stays contiguous.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        if !self.overlaps(other) {
            return *self;
        }
        let below = Self::new(self.start, other.start);
        let above = Self::new(other.end, self.end);
        match (below.is_empty(), above.is_empty()) {
            (true, true) => Self::new(self.start, self.start),
            (false, true) => below,
            (true, false) => above,
            (false, false) if above.len() > below.len() => above,
            (false, false) => below,
        }
    }
}

impl From<std::ops::Range<i64>> for Span {
    fn from(range: std::ops::Range<i64>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}..{:#x})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_and_emptiness() {
        let a = Span::new(0, 10);
        assert_eq!(a.intersect(&Span::new(5, 20)), Some(Span::new(5, 10)));
        assert_eq!(a.intersect(&Span::new(10, 20)), None);
        assert!(Span::new(4, 4).is_empty());
        assert_eq!(Span::new(9, 3).len(), 0);
    }

    #[test]
    fn subtract_trims_either_side() {
        let a = Span::new(10, 20);
        assert_eq!(a.subtract(&Span::new(0, 5)), a);
        assert_eq!(a.subtract(&Span::new(0, 12)), Span::new(12, 20));
        assert_eq!(a.subtract(&Span::new(15, 30)), Span::new(10, 15));
        assert!(a.subtract(&Span::new(0, 30)).is_empty());
    }

    #[test]
    fn subtract_from_the_middle_keeps_longer_side() {
        let a = Span::new(0, 100);
        assert_eq!(a.subtract(&Span::new(10, 20)), Span::new(20, 100));
        assert_eq!(a.subtract(&Span::new(80, 90)), Span::new(0, 80));
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Span::new(16, 255).to_string(), "[0x10..0xff)");
    }
}
