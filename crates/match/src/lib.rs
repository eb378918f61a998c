#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Approximate matching of a modified binary against an original.
//!
//! This crate finds where the bytes of one buffer reappear in another,
//! possibly shifted by whole steps or lightly edited:
//! - [`SeamBase`] fingerprints and indexes the original once
//! - [`SeamDiff`] holds the [`Seam`]s of one modified buffer: ranges paired
//!   with the original under a constant translation
//! - [`Hamming`] counts the bytes and bits that still differ
//! - [`Cost`] reports how much searching a comparison took
//!
//! # Design
//!
//! Anchors are sampled from the modified fingerprints with a seeded
//! generator and matched in the `partition` metric tree. Runs of anchors
//! sharing a drift become seams; the longest monotonic run of matched
//! positions marks the main sequence. [`SeamDiff::heal_gaps`] then closes
//! the gaps between seams byte by byte.
//!
//! # Examples
//!
//! ```
//! use matching::{Sampling, SeamBase};
//! use partition::{Metrics, TreeSettings};
//! use rolling::{Endian, HashRoller};
//!
//! let original: Vec<u8> = (0..2048u32).map(|i| (i * 7 % 251) as u8).collect();
//! let base = SeamBase::index(
//!     &original,
//!     HashRoller::TamienHalfword,
//!     Endian::Little,
//!     Metrics::ShortRadial,
//!     &TreeSettings::default(),
//! )?;
//! let modified = HashRoller::TamienHalfword.index(&original, Endian::Little);
//! let mut diff = base.approximate(&modified, &Sampling::default())?;
//! diff.heal(&original, &original)?;
//! assert_eq!(diff.overall().len(), 1);
//! # Ok::<(), matching::MatchError>(())
//! ```
//!
//! # See also
//!
//! - `rolling` for the fingerprints
//! - `partition` for the metric tree and the monotonic subsequence

mod base;
mod cost;
mod diff;
mod error;
pub mod frame;
mod hamming;
mod seam;
mod seam_map;
mod span;

pub use base::{Sampling, SeamBase, stitch_estimate};
pub use cost::Cost;
pub use diff::SeamDiff;
pub use error::MatchError;
pub use hamming::Hamming;
pub use seam::{Hole, Seam};
pub use seam_map::SeamMap;
pub use span::Span;
