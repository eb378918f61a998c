#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Rolling window fingerprints for approximate binary matching.
//!
//! # Overview
//!
//! A [`HashRoller`] turns a byte buffer into [`Fingerprints`]: one 64-bit
//! value per step of the input, each summarizing the window of steps ending
//! there. Similar windows get fingerprints that are close under the metrics
//! of the `partition` crate, which is what lets a nearest-neighbor search
//! find shifted or lightly edited code.
//!
//! # Design
//!
//! - [`Words`] and [`WordsMut`] read and write a byte slice as 2, 4 or 8
//!   byte words in either byte order.
//! - [`Tamien`] is the window hash behind the production rollers.
//! - [`HashRoller`] carries the step, window and warm-up sizes and converts
//!   between fingerprint indices and byte offsets.
//!
//! # Examples
//!
//! ```
//! use rolling::{Endian, HashRoller};
//!
//! let code = [0x2d_u8, 0xe9, 0xf0, 0x41].repeat(32);
//! let fingerprints = HashRoller::TamienHalfword.index(&code, Endian::Little);
//! assert_eq!(fingerprints.len(), 64);
//! assert_eq!(fingerprints.first_usable(), 15);
//! assert_eq!(fingerprints.byte_len(), 128);
//! ```

mod error;
mod fingerprints;
mod roller;
mod tamien;
mod words;

pub use error::RollingError;
pub use fingerprints::{Fingerprints, ensure_same_algorithm};
pub use roller::HashRoller;
pub use tamien::Tamien;
pub use words::{Endian, WordWidth, Words, WordsMut};
