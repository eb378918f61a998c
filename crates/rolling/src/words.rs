//! crates/rolling/src/words.rs
//! Width-parameterized word views over raw bytes.
//!
//! A [`Words`] view reads a byte slice as consecutive 2, 4 or 8 byte words
//! in a chosen byte order. [`WordsMut`] additionally writes words back, which
//! is what the bleach transforms need. Trailing bytes that do not fill a
//! whole word are not part of the view.

use std::fmt;

/// Byte order used to assemble words from bytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endian {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// Width of one word in bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WordWidth {
    /// 16-bit halfwords.
    Half,
    /// 32-bit words.
    Word,
    /// 64-bit doublewords.
    Double,
}

impl WordWidth {
    /// Number of bytes in one word.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

    /// Mask selecting the bits a word of this width can hold.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u64 {
        match self {
            Self::Half => 0xffff,
            Self::Word => 0xffff_ffff,
            Self::Double => u64::MAX,
        }
    }
}

impl fmt::Display for WordWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bytes() * 8)
    }
}

#[inline]
fn decode(chunk: &[u8], endian: Endian) -> u64 {
    match endian {
        Endian::Little => chunk
            .iter()
            .rev()
            .fold(0, |acc, &byte| (acc << 8) | u64::from(byte)),
        Endian::Big => chunk
            .iter()
            .fold(0, |acc, &byte| (acc << 8) | u64::from(byte)),
    }
}

#[inline]
fn encode(chunk: &mut [u8], value: u64, endian: Endian) {
    let len = chunk.len();
    for (i, byte) in chunk.iter_mut().enumerate() {
        let shift = match endian {
            Endian::Little => i,
            Endian::Big => len - 1 - i,
        } * 8;
        *byte = (value >> shift) as u8;
    }
}

/// Read-only strided view over a byte slice.
#[derive(Clone, Copy, Debug)]
pub struct Words<'a> {
    bytes: &'a [u8],
    width: WordWidth,
    endian: Endian,
}

impl<'a> Words<'a> {
    /// Creates a view reading `width` words in `endian` order.
    #[must_use]
    pub const fn new(bytes: &'a [u8], width: WordWidth, endian: Endian) -> Self {
        Self {
            bytes,
            width,
            endian,
        }
    }

    /// Number of whole words in the view.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len() / self.width.bytes()
    }

    /// Returns `true` when not even one word fits.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Word width of the view.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> WordWidth {
        self.width
    }

    /// Byte order of the view.
    #[inline]
    #[must_use]
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// Reads the word at `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u64> {
        let size = self.width.bytes();
        let start = index.checked_mul(size)?;
        let chunk = self.bytes.get(start..start.checked_add(size)?)?;
        Some(decode(chunk, self.endian))
    }

    /// Iterates over all whole words in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = u64> + 'a {
        let endian = self.endian;
        self.bytes
            .chunks_exact(self.width.bytes())
            .map(move |chunk| decode(chunk, endian))
    }
}

/// Mutable strided view over a byte slice.
#[derive(Debug)]
pub struct WordsMut<'a> {
    bytes: &'a mut [u8],
    width: WordWidth,
    endian: Endian,
}

impl<'a> WordsMut<'a> {
    /// Creates a writable view of `width` words in `endian` order.
    #[must_use]
    pub fn new(bytes: &'a mut [u8], width: WordWidth, endian: Endian) -> Self {
        Self {
            bytes,
            width,
            endian,
        }
    }

    /// Number of whole words in the view.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() / self.width.bytes()
    }

    /// Returns `true` when not even one word fits.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Word width of the view.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> WordWidth {
        self.width
    }

    /// Reads the word at `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u64> {
        self.as_words().get(index)
    }

    /// Writes `value`, truncated to the word width, at `index`.
    ///
    /// Returns `false` and leaves the buffer untouched past the end.
    #[inline]
    pub fn set(&mut self, index: usize, value: u64) -> bool {
        let size = self.width.bytes();
        let Some(end) = index.checked_add(1).and_then(|n| n.checked_mul(size)) else {
            return false;
        };
        match self.bytes.get_mut(end - size..end) {
            Some(chunk) => {
                encode(chunk, value & self.width.mask(), self.endian);
                true
            }
            None => false,
        }
    }

    /// Reborrows as a read-only view.
    #[must_use]
    pub fn as_words(&self) -> Words<'_> {
        Words::new(self.bytes, self.width, self.endian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfwords_follow_byte_order() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0xff];
        let le = Words::new(&bytes, WordWidth::Half, Endian::Little);
        let be = Words::new(&bytes, WordWidth::Half, Endian::Big);
        assert_eq!(le.len(), 2);
        assert_eq!(le.iter().collect::<Vec<_>>(), vec![0x0201, 0x0403]);
        assert_eq!(be.iter().collect::<Vec<_>>(), vec![0x0102, 0x0304]);
        assert_eq!(le.get(2), None);
    }

    #[test]
    fn doublewords_decode_full_width() {
        let bytes = 0x0102_0304_0506_0708_u64.to_be_bytes();
        let be = Words::new(&bytes, WordWidth::Double, Endian::Big);
        assert_eq!(be.get(0), Some(0x0102_0304_0506_0708));
        let le = Words::new(&bytes, WordWidth::Double, Endian::Little);
        assert_eq!(le.get(0), Some(0x0807_0605_0403_0201));
    }

    #[test]
    fn set_truncates_and_respects_order() {
        let mut bytes = [0u8; 8];
        let mut words = WordsMut::new(&mut bytes, WordWidth::Word, Endian::Big);
        assert!(words.set(1, 0x1_dead_beef));
        assert!(!words.set(2, 1));
        assert_eq!(words.get(1), Some(0xdead_beef));
        assert_eq!(bytes, [0, 0, 0, 0, 0xde, 0xad, 0xbe, 0xef]);
    }
}
