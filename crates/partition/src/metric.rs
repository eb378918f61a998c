//! crates/partition/src/metric.rs
//! Distance functions between fingerprints.
//!
//! Every [`Metrics`] variant is a metric in the strict sense, or the floor of
//! one, which is what keeps [`MetricTree`](crate::MetricTree) queries exact.

use std::fmt;

/// A distance between two fingerprints.
///
/// Implementations must be symmetric, return zero for equal inputs and obey
/// the triangle inequality, possibly up to flooring of a real-valued metric.
pub trait Metric {
    /// Distance between `left` and `right`.
    fn distance(&self, left: u64, right: u64) -> u32;
}

impl<M: Metric + ?Sized> Metric for &M {
    #[inline]
    fn distance(&self, left: u64, right: u64) -> u32 {
        (**self).distance(left, right)
    }
}

/// Built-in distance functions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Metrics {
    /// Number of differing bits.
    BitCount,
    /// Euclidean distance between the byte vectors, floored.
    ByteRadial,
    /// Sum of absolute byte differences.
    ByteTotal,
    /// All bytes of the XOR ORed into one byte.
    ByteXorBall,
    /// Sum of absolute nibble differences.
    NibbleRadial,
    /// Euclidean distance between the halfword vectors, floored.
    #[default]
    ShortRadial,
}

/// Sum of `f(left lane, right lane)` over the `width`-bit lanes.
#[inline]
fn lanes(mut left: u64, mut right: u64, width: u32, f: impl Fn(i64, i64) -> u64) -> u64 {
    let mask = (1u64 << width) - 1;
    let mut total = 0;
    while (left | right) != 0 {
        total += f((left & mask) as i64, (right & mask) as i64);
        left >>= width;
        right >>= width;
    }
    total
}

impl Metrics {
    /// Every built-in metric.
    pub const ALL: [Self; 6] = [
        Self::BitCount,
        Self::ByteRadial,
        Self::ByteTotal,
        Self::ByteXorBall,
        Self::NibbleRadial,
        Self::ShortRadial,
    ];

    /// Short metric name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BitCount => "bit-count",
            Self::ByteRadial => "byte-radial",
            Self::ByteTotal => "byte-total",
            Self::ByteXorBall => "byte-xor-ball",
            Self::NibbleRadial => "nibble-radial",
            Self::ShortRadial => "short-radial",
        }
    }
}

impl Metric for Metrics {
    #[inline]
    fn distance(&self, left: u64, right: u64) -> u32 {
        match self {
            Self::BitCount => (left ^ right).count_ones(),
            Self::ByteRadial => lanes(left, right, 8, |l, r| ((l - r) * (l - r)) as u64).isqrt() as u32,
            Self::ByteTotal => lanes(left, right, 8, |l, r| l.abs_diff(r)) as u32,
            Self::ByteXorBall => {
                let mut x = left ^ right;
                x |= x >> 32;
                x |= x >> 16;
                x |= x >> 8;
                (x & 0xff) as u32
            }
            Self::NibbleRadial => lanes(left, right, 4, |l, r| l.abs_diff(r)) as u32,
            Self::ShortRadial => lanes(left, right, 16, |l, r| ((l - r) * (l - r)) as u64).isqrt() as u32,
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
