//! crates/bleach/src/code.rs
//! Operand masking of branch instructions.

use rolling::{Endian, WordWidth};

use crate::{Bleach, WordRule, rewrite_words};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Start {
    /// The masked word equals the opcode.
    Opcode,
    /// The raw word is one of these.
    Exactly(&'static [u64]),
}

/// Clears the operand bits of an instruction and optionally of the words
/// that continue it.
#[derive(Clone, Debug)]
pub struct CodeBleach {
    width: WordWidth,
    code: u64,
    mask: u64,
    op_code_count: usize,
    start: Start,
    suffix: Option<u64>,
    sub_range: usize,
}

impl CodeBleach {
    /// Masks `mask` out of every word whose remaining bits equal `code`;
    /// the `op_code_count - 1` following words are left as they are.
    #[must_use]
    pub const fn new(width: WordWidth, code: u64, mask: u64, op_code_count: usize) -> Self {
        Self {
            width,
            code,
            mask,
            op_code_count,
            start: Start::Opcode,
            suffix: None,
            sub_range: 0,
        }
    }

    /// ARM `BL`: 24-bit offset after the `0xeb` condition and opcode byte.
    #[must_use]
    pub const fn arm_bl() -> Self {
        Self::new(WordWidth::Word, 0xeb00_0000, 0x00ff_ffff, 1)
    }

    /// Thumb `BL` pair: `0xf000` prefix and `0xf800` suffix halfwords, each
    /// with an 11-bit offset.
    #[must_use]
    pub const fn thumb_bl() -> Self {
        let mut bleach = Self::new(WordWidth::Half, 0xf000, 0x07ff, 2);
        bleach.suffix = Some(0xf800);
        bleach
    }

    /// Thumb `BL` starting only on the common prefixes `0xf000` and
    /// `0xf700`, which keeps unrelated data from being touched.
    #[must_use]
    pub const fn weak_thumb_bl() -> Self {
        let mut bleach = Self::thumb_bl();
        bleach.start = Start::Exactly(&[0xf000, 0xf700]);
        bleach
    }

    fn should_start(&self, read: u64, head: u64) -> bool {
        match self.start {
            Start::Opcode => head == self.code,
            Start::Exactly(words) => words.contains(&read),
        }
    }

    fn step_within_range(&mut self) {
        self.sub_range += 1;
        if self.sub_range >= self.op_code_count {
            self.sub_range = 0;
        }
    }
}

impl WordRule for CodeBleach {
    fn width(&self) -> WordWidth {
        self.width
    }

    fn rewrite(&mut self, _index: usize, read: u64) -> Option<u64> {
        let cleared = read & !self.mask;
        if self.sub_range == 0 {
            if !self.should_start(read, cleared) {
                return None;
            }
            self.step_within_range();
            return Some(cleared);
        }
        self.step_within_range();
        match self.suffix {
            Some(suffix) if cleared == suffix => Some(cleared),
            _ => None,
        }
    }
}

impl Bleach for CodeBleach {
    fn bleach(&mut self, bytes: &mut [u8], endian: Endian) {
        rewrite_words(self, bytes, endian);
    }

    fn reset(&mut self) {
        self.sub_range = 0;
    }
}
