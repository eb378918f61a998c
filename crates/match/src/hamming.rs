//! crates/match/src/hamming.rs
//! Byte and bit mismatch counters.

use std::fmt;
use std::ops::{Add, AddAssign};

use crate::seam::Seam;
use crate::span::Span;

/// Mismatch totals between paired byte ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hamming {
    common: u64,
    unique: u64,
    digits: u64,
    octets: u64,
}

impl Hamming {
    /// All counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            common: 0,
            unique: 0,
            digits: 0,
            octets: 0,
        }
    }

    /// Bytes compared pairwise.
    #[must_use]
    pub const fn common(&self) -> u64 {
        self.common
    }

    /// Bytes present on one side only.
    #[must_use]
    pub const fn unique(&self) -> u64 {
        self.unique
    }

    /// Differing bits, unique bytes counting eight each.
    #[must_use]
    pub const fn digits(&self) -> u64 {
        self.digits
    }

    /// Differing bytes, unique bytes included.
    #[must_use]
    pub const fn octets(&self) -> u64 {
        self.octets
    }

    /// Returns `true` when no byte differs.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.octets == 0
    }

    /// Accounts for one XOR of a byte pair.
    #[inline]
    pub const fn post_byte(&mut self, xor: u8) {
        if xor != 0 {
            self.octets += 1;
            self.digits += xor.count_ones() as u64;
        }
    }

    /// Compares `left` with `right` over their common length; the longer
    /// tail counts as unique.
    pub fn compare(&mut self, left: &[u8], right: &[u8]) {
        let common = left.len().min(right.len());
        for (a, b) in left.iter().zip(right) {
            self.post_byte(a ^ b);
        }
        let rest = (left.len().max(right.len()) - common) as u64;
        self.common += common as u64;
        self.unique += rest;
        self.octets += rest;
        self.digits += rest * 8;
    }

    /// Compares every seam of `seams` against its counterpart.
    ///
    /// `on_partial` sees each seam together with its own totals.
    pub fn add_seams<'s>(
        &mut self,
        seams: impl IntoIterator<Item = &'s Seam>,
        original: &[u8],
        modified: &[u8],
        mut on_partial: impl FnMut(&Seam, &Self),
    ) {
        for seam in seams {
            let mut partial = Self::new();
            partial.compare(
                clamp(modified, seam.span()),
                clamp(original, seam.inverse().span()),
            );
            on_partial(seam, &partial);
            *self += partial;
        }
    }
}

fn clamp(bytes: &[u8], span: Span) -> &[u8] {
    let len = bytes.len() as i64;
    let start = span.start.clamp(0, len);
    let end = span.end.clamp(start, len);
    &bytes[start as usize..end as usize]
}

impl AddAssign for Hamming {
    fn add_assign(&mut self, other: Self) {
        self.common += other.common;
        self.unique += other.unique;
        self.digits += other.digits;
        self.octets += other.octets;
    }
}

impl Add for Hamming {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl fmt::Display for Hamming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{common={} unique={} !> bytes={} bits={}}}",
            self.common, self.unique, self.octets, self.digits
        )
    }
}
