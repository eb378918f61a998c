//! crates/bleach/src/data.rs
//! Tagging of repeated words.

use rolling::{Endian, WordWidth};

use crate::{Bleach, WordRule, rewrite_words};

/// Adds an increasing counter to every repetition of a word, so a run
/// `w w w w` becomes `w w+1 w+2 w+3`.
///
/// Runs before the first change of value are kept: a buffer that starts
/// with padding keeps it.
#[derive(Clone, Debug)]
pub struct DataBleach {
    width: WordWidth,
    zeros_only: bool,
    ever: bool,
    index: u64,
    prev: u64,
}

impl DataBleach {
    /// Tags runs of `width`-sized words.
    #[must_use]
    pub const fn new(width: WordWidth) -> Self {
        Self {
            width,
            zeros_only: false,
            ever: false,
            index: 0,
            prev: 0,
        }
    }
}

impl WordRule for DataBleach {
    fn width(&self) -> WordWidth {
        self.width
    }

    fn rewrite(&mut self, index: usize, read: u64) -> Option<u64> {
        let mut tagged = None;
        if index > 0 {
            if read == self.prev {
                if self.ever && (!self.zeros_only || read == 0) {
                    self.index += 1;
                    tagged = Some(read.wrapping_add(self.index) & self.width.mask());
                }
            } else {
                self.ever = true;
                self.index = 0;
            }
        }
        self.prev = read;
        tagged
    }
}

impl Bleach for DataBleach {
    fn bleach(&mut self, bytes: &mut [u8], endian: Endian) {
        rewrite_words(self, bytes, endian);
    }

    fn reset(&mut self) {
        self.ever = false;
    }
}

/// [`DataBleach`] restricted to runs of zero words.
#[derive(Clone, Debug)]
pub struct ZeroBleach(DataBleach);

impl ZeroBleach {
    /// Tags runs of zero `width`-sized words.
    #[must_use]
    pub const fn new(width: WordWidth) -> Self {
        let mut inner = DataBleach::new(width);
        inner.zeros_only = true;
        Self(inner)
    }
}

impl Bleach for ZeroBleach {
    fn bleach(&mut self, bytes: &mut [u8], endian: Endian) {
        self.0.bleach(bytes, endian);
    }

    fn reset(&mut self) {
        self.0.reset();
    }
}
