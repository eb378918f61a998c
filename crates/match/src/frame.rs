//! crates/match/src/frame.rs
//! Buffers tied to the address they were loaded from.
//!
//! Seams are expressed in buffer offsets. A [`Frame`] remembers the absolute
//! address of offset zero so results can be reported in the address space the
//! bytes came from, and a [`FramePair`] relates the two sides of a comparison.

use crate::seam::Seam;
use crate::span::Span;

/// One side of a comparison.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    bytes: &'a [u8],
    reference: u64,
}

impl<'a> Frame<'a> {
    /// `bytes` as loaded from absolute address `reference`.
    #[must_use]
    pub const fn new(bytes: &'a [u8], reference: u64) -> Self {
        Self { bytes, reference }
    }

    /// The bytes.
    #[must_use]
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Absolute address of the first byte.
    #[must_use]
    pub const fn reference(&self) -> u64 {
        self.reference
    }

    /// Absolute address just past the last byte.
    #[must_use]
    pub const fn ref_limit(&self) -> u64 {
        self.reference.saturating_add(self.bytes.len() as u64)
    }

    /// Returns `true` when `address` falls inside the frame.
    #[must_use]
    pub const fn is_within(&self, address: u64) -> bool {
        self.reference <= address && address < self.ref_limit()
    }

    /// Buffer offset of an absolute address inside the frame.
    #[must_use]
    pub const fn as_offset(&self, address: u64) -> Option<usize> {
        if self.is_within(address) {
            Some((address - self.reference) as usize)
        } else {
            None
        }
    }

    /// Byte at an absolute address.
    #[must_use]
    pub fn byte_at(&self, address: u64) -> Option<u8> {
        self.as_offset(address).and_then(|offset| self.bytes.get(offset).copied())
    }

    /// Absolute range of a buffer span.
    #[must_use]
    pub const fn absolute(&self, span: Span) -> Span {
        span.translate(self.reference as i64)
    }
}

/// The original and modified sides of a comparison.
#[derive(Clone, Copy, Debug)]
pub struct FramePair<'a> {
    original: Frame<'a>,
    modified: Frame<'a>,
}

impl<'a> FramePair<'a> {
    /// Pairs both sides.
    #[must_use]
    pub const fn new(original: Frame<'a>, modified: Frame<'a>) -> Self {
        Self { original, modified }
    }

    /// Original side.
    #[must_use]
    pub const fn original(&self) -> Frame<'a> {
        self.original
    }

    /// Modified side.
    #[must_use]
    pub const fn modified(&self) -> Frame<'a> {
        self.modified
    }

    /// Difference of the reference addresses.
    #[must_use]
    pub const fn translation(&self) -> i64 {
        self.original.reference.wrapping_sub(self.modified.reference) as i64
    }

    /// Seam pairing both buffers byte for byte from offset zero.
    #[must_use]
    pub const fn side_by_side(&self, step: u32) -> Seam {
        let len = if self.original.bytes.len() < self.modified.bytes.len() {
            self.original.bytes.len()
        } else {
            self.modified.bytes.len()
        };
        Seam::new(Span::of_len(len), step, 0, true)
    }
}
