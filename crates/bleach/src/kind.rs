//! crates/bleach/src/kind.rs
//! Named bleach presets.

use std::fmt;
use std::str::FromStr;

use rolling::{Endian, WordWidth};
use thiserror::Error;

use crate::code::CodeBleach;
use crate::data::{DataBleach, ZeroBleach};
use crate::{Bleach, PlainBleach};

/// Unrecognized preset name.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown bleach '{0}'")]
pub struct UnknownBleach(pub String);

/// Selectable bleach presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BleachKind {
    /// No change.
    None,
    /// Zero the whole buffer.
    Clear,
    /// ARM `BL` offsets.
    ArmBl,
    /// Thumb `BL` offsets.
    ThumbBl,
    /// Thumb `BL` offsets after the two common prefixes only.
    WeakThumbBl,
    /// Runs of repeated halfwords.
    CharRep,
    /// Runs of repeated words.
    WordRep,
    /// Runs of zero words.
    ZeroRep,
}

impl BleachKind {
    /// Every preset.
    pub const ALL: [Self; 8] = [
        Self::None,
        Self::Clear,
        Self::ArmBl,
        Self::ThumbBl,
        Self::WeakThumbBl,
        Self::CharRep,
        Self::WordRep,
        Self::ZeroRep,
    ];

    /// Preset name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Clear => "clear",
            Self::ArmBl => "arm_bl",
            Self::ThumbBl => "thumb_bl",
            Self::WeakThumbBl => "weak_thumb_bl",
            Self::CharRep => "char_rep",
            Self::WordRep => "word_rep",
            Self::ZeroRep => "zero_rep",
        }
    }

    /// A fresh instance of the preset.
    #[must_use]
    pub fn create(self) -> Box<dyn Bleach + Send> {
        match self {
            Self::None => Box::new(PlainBleach::NoOp),
            Self::Clear => Box::new(PlainBleach::Clear),
            Self::ArmBl => Box::new(CodeBleach::arm_bl()),
            Self::ThumbBl => Box::new(CodeBleach::thumb_bl()),
            Self::WeakThumbBl => Box::new(CodeBleach::weak_thumb_bl()),
            Self::CharRep => Box::new(DataBleach::new(WordWidth::Half)),
            Self::WordRep => Box::new(DataBleach::new(WordWidth::Word)),
            Self::ZeroRep => Box::new(ZeroBleach::new(WordWidth::Word)),
        }
    }
}

impl fmt::Display for BleachKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BleachKind {
    type Err = UnknownBleach;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| UnknownBleach(s.to_owned()))
    }
}

/// Applies fresh instances of `kinds` to `bytes`, in order.
pub fn bleach_all(kinds: &[BleachKind], bytes: &mut [u8], endian: Endian) {
    for kind in kinds {
        kind.create().bleach(bytes, endian);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in BleachKind::ALL {
            assert_eq!(kind.name().parse::<BleachKind>(), Ok(kind));
        }
        assert_eq!("Weak-Thumb-BL".parse(), Ok(BleachKind::WeakThumbBl));
        assert!("thumb".parse::<BleachKind>().is_err());
    }

    #[test]
    fn presets_apply_in_order() {
        let mut bytes = 0xeb12_3456_u32.to_le_bytes().repeat(3);
        bleach_all(
            &[BleachKind::ArmBl, BleachKind::WordRep],
            &mut bytes,
            Endian::Little,
        );
        let words: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(words, [0xeb00_0000; 3]);
    }
}
