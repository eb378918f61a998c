//! crates/rolling/src/roller.rs
//! Named fingerprint configurations and their step/byte geometry.

use std::fmt;
use std::sync::Arc;

use logging::trace_hash;

use crate::error::RollingError;
use crate::fingerprints::Fingerprints;
use crate::tamien::Tamien;
use crate::words::{Endian, WordWidth, Words};

/// A fingerprint configuration.
///
/// Each roller consumes the input one *step* (a fixed number of bytes) at a
/// time and publishes one fingerprint per step. The fingerprint at index `i`
/// summarizes the `window` steps ending at step `i`; the first
/// `warm_up_steps` fingerprints summarize partial windows and are unusable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HashRoller {
    /// Concatenation of the last four halfwords. Reference configuration for
    /// tests; distances under byte metrics are easy to reason about.
    AppendHalfword,
    /// Tamien hash over 16-bit words, fed each word and its high byte.
    #[default]
    TamienHalfword,
    /// Tamien hash over 32-bit words, fed each word and its top byte.
    TamienWord,
}

impl HashRoller {
    /// Every configuration.
    pub const ALL: [Self; 3] = [Self::AppendHalfword, Self::TamienHalfword, Self::TamienWord];

    /// Bytes consumed per fingerprint.
    #[inline]
    #[must_use]
    pub const fn step_bytes(self) -> usize {
        self.word_width().bytes()
    }

    /// Window length in steps.
    #[inline]
    #[must_use]
    pub const fn window_steps(self) -> usize {
        match self {
            Self::AppendHalfword => 4,
            Self::TamienHalfword => 16,
            Self::TamienWord => 8,
        }
    }

    /// Leading fingerprints covering a partial window.
    #[inline]
    #[must_use]
    pub const fn warm_up_steps(self) -> usize {
        match self {
            Self::AppendHalfword => 3,
            Self::TamienHalfword => 15,
            Self::TamienWord => 7,
        }
    }

    /// Window length in bytes.
    #[inline]
    #[must_use]
    pub const fn window_bytes(self) -> usize {
        self.window_steps() * self.step_bytes()
    }

    /// Warm-up length in bytes.
    #[inline]
    #[must_use]
    pub const fn warm_up_bytes(self) -> usize {
        self.warm_up_steps() * self.step_bytes()
    }

    /// Word width read per step.
    #[inline]
    #[must_use]
    pub const fn word_width(self) -> WordWidth {
        match self {
            Self::AppendHalfword | Self::TamienHalfword => WordWidth::Half,
            Self::TamienWord => WordWidth::Word,
        }
    }

    /// Byte offset where the window of fingerprint `index` begins.
    ///
    /// Negative for warm-up indices.
    #[inline]
    #[must_use]
    pub const fn window_start(self, index: usize) -> i64 {
        (index as i64 - self.warm_up_steps() as i64) * self.step_bytes() as i64
    }

    /// Byte offset just past the window of fingerprint `index`.
    #[inline]
    #[must_use]
    pub const fn after_window(self, index: usize) -> i64 {
        self.window_start(index) + self.window_bytes() as i64
    }

    /// Fingerprint index whose window starts at `address`.
    ///
    /// Addresses inside a step round down to the step start, also below
    /// zero where warm-up windows begin.
    #[inline]
    #[must_use]
    pub const fn index_of_window_start(self, address: i64) -> i64 {
        address.div_euclid(self.step_bytes() as i64) + self.warm_up_steps() as i64
    }

    /// Fingerprint index whose window ends just before `address`.
    #[inline]
    #[must_use]
    pub const fn index_of_after_window(self, address: i64) -> i64 {
        self.index_of_window_start(address - self.window_bytes() as i64)
    }

    /// Verifies the first usable window covers exactly `[0, window_bytes)`.
    pub const fn check_geometry(self) -> Result<(), RollingError> {
        let warm_up = self.warm_up_steps();
        if self.window_start(warm_up) != 0 || self.after_window(warm_up) != self.window_bytes() as i64
        {
            return Err(RollingError::MisalignedWarmUp {
                roller: self,
                warm_up,
                window: self.window_steps(),
            });
        }
        Ok(())
    }

    /// Fingerprints `bytes` read as words in `endian` order.
    ///
    /// Trailing bytes that do not fill a step are ignored.
    #[must_use]
    pub fn index(self, bytes: &[u8], endian: Endian) -> Fingerprints {
        let words = Words::new(bytes, self.word_width(), endian);
        let values: Vec<u64> = match self {
            Self::AppendHalfword => words
                .iter()
                .scan(0u64, |rolling, word| {
                    *rolling = (*rolling << 16) | word;
                    Some(*rolling)
                })
                .collect(),
            Self::TamienHalfword => tamien_index(words, 32, 0xff00),
            Self::TamienWord => tamien_index(words, 16, 0xff00_0000),
        };

        trace_hash!(
            roller = %self,
            bytes = bytes.len(),
            fingerprints = values.len(),
            "indexed buffer"
        );

        Fingerprints::new(self, Arc::from(values))
    }

    /// Short configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AppendHalfword => "append-halfword",
            Self::TamienHalfword => "tamien-halfword",
            Self::TamienWord => "tamien-word",
        }
    }
}

/// Feeds every word and its high part into a Tamien window of `window`
/// values, publishing one fingerprint per word.
fn tamien_index(words: Words<'_>, window: usize, high: u64) -> Vec<u64> {
    let mut tamien = Tamien::new(2, 1, window);
    words
        .iter()
        .map(|word| {
            tamien.put(word as u32 as i32);
            tamien.put((word & high) as u32 as i32);
            tamien.value()
        })
        .collect()
}

impl fmt::Display for HashRoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_of_every_roller_is_aligned() {
        for roller in HashRoller::ALL {
            roller.check_geometry().unwrap();
            assert_eq!(roller.window_steps(), roller.warm_up_steps() + 1);
        }
    }

    #[test]
    fn tamien_halfword_geometry() {
        let roller = HashRoller::TamienHalfword;
        assert_eq!(roller.window_bytes(), 32);
        assert_eq!(roller.warm_up_bytes(), 30);
        assert_eq!(roller.window_start(15), 0);
        assert_eq!(roller.window_start(0), -30);
        assert_eq!(roller.after_window(20), 42);
        assert_eq!(roller.index_of_window_start(10), 20);
        assert_eq!(roller.index_of_window_start(11), 20);
        assert_eq!(roller.index_of_after_window(42), 20);
    }

    #[test]
    fn negative_addresses_round_down() {
        let roller = HashRoller::TamienHalfword;
        assert_eq!(roller.index_of_window_start(-30), 0);
        assert_eq!(roller.index_of_window_start(-29), 0);
        assert_eq!(roller.index_of_window_start(-1), 14);
        assert_eq!(roller.index_of_after_window(2), 0);
        assert_eq!(roller.index_of_after_window(1), -1);
        assert_eq!(roller.window_start(0), -30);
    }

    #[test]
    fn append_halfword_concatenates() {
        let bytes = [1, 0, 2, 0, 3, 0, 4, 0, 5, 0];
        let fp = HashRoller::AppendHalfword.index(&bytes, Endian::Little);
        assert_eq!(fp.values()[3], 0x0001_0002_0003_0004);
        assert_eq!(fp.values()[4], 0x0002_0003_0004_0005);
    }

    #[test]
    fn index_ignores_partial_trailing_step() {
        let fp = HashRoller::TamienWord.index(&[0u8; 18], Endian::Big);
        assert_eq!(fp.len(), 4);
    }
}
