#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! In-place transforms applied to private copies of buffers before they are
//! fingerprinted.
//!
//! Branch instructions encode relative targets, so code that merely moved
//! differs in every call site. [`CodeBleach`] clears those operand bits.
//! Long runs of one repeated word match each other everywhere;
//! [`DataBleach`] tags them with a counter so they stop doing so.
//!
//! # Examples
//!
//! ```
//! use bleach::{Bleach, CodeBleach};
//! use rolling::Endian;
//!
//! let mut code = 0xeb00_1234_u32.to_le_bytes();
//! CodeBleach::arm_bl().bleach(&mut code, Endian::Little);
//! assert_eq!(u32::from_le_bytes(code), 0xeb00_0000);
//! ```

mod code;
mod data;
mod kind;

use rolling::{Endian, WordWidth, WordsMut};

pub use code::CodeBleach;
pub use data::{DataBleach, ZeroBleach};
pub use kind::{BleachKind, UnknownBleach, bleach_all};

/// A transform over a byte buffer.
pub trait Bleach {
    /// Rewrites `bytes` in place.
    fn bleach(&mut self, bytes: &mut [u8], endian: Endian);

    /// Forgets state carried over from a previous buffer.
    fn reset(&mut self) {}
}

/// Leaves buffers alone or zeroes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlainBleach {
    /// No change.
    NoOp,
    /// Every byte becomes zero.
    Clear,
}

impl Bleach for PlainBleach {
    fn bleach(&mut self, bytes: &mut [u8], _endian: Endian) {
        if *self == Self::Clear {
            bytes.fill(0);
        }
    }
}

/// Word-at-a-time rewriting shared by the stateful bleaches.
trait WordRule {
    fn width(&self) -> WordWidth;

    /// Replacement for the word at `index`, if any.
    fn rewrite(&mut self, index: usize, read: u64) -> Option<u64>;
}

fn rewrite_words(rule: &mut impl WordRule, bytes: &mut [u8], endian: Endian) {
    let mut words = WordsMut::new(bytes, rule.width(), endian);
    for index in 0..words.len() {
        let Some(read) = words.get(index) else {
            break;
        };
        if let Some(value) = rule.rewrite(index, read) {
            words.set(index, value);
        }
    }
}
