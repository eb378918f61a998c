#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `exediff` compares a modified binary image, typically memory from a crash
//! dump, against the original it was loaded from. It reports which byte
//! ranges of the original reappear in the modified buffer and at what
//! translation, how many bytes and bits still differ, and a [`Quality`]
//! verdict on whether the two are the same program.
//!
//! # Design
//!
//! The workspace splits the engine by stage:
//! - `rolling` fingerprints fixed windows with a rolling hash
//! - `partition` indexes fingerprints in a metric tree and finds the longest
//!   monotonic run of matches
//! - `matching` samples anchors, groups them into seams and heals the gaps
//! - `quality` counts Hamming mismatches and grades the result
//! - `bleach` blanks volatile encodings before fingerprinting
//!
//! This crate wires them into one pipeline. [`BatchDiff`] indexes an
//! original once and then compares any number of modified buffers against
//! it; [`compare`] does both steps for a single pair.
//!
//! # Examples
//!
//! ```
//! use exediff::{ComparisonSettings, Quality, compare};
//!
//! let original: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 253) as u8).collect();
//! let comparison = compare(&original, &original, &ComparisonSettings::default())?;
//! assert_eq!(comparison.quality(), Quality::ExactSame);
//! assert!(comparison.report().starts_with("Quality: "));
//! # Ok::<(), exediff::Error>(())
//! ```

mod batch;
mod comparison;
mod error;
mod settings;

pub use batch::{BatchDiff, compare};
pub use comparison::Comparison;
pub use error::Error;
pub use settings::ComparisonSettings;

pub use bleach::{Bleach, BleachKind};
pub use logging::{Subsystem, VerbosityConfig};
pub use matching::{Cost, Hamming, Hole, MatchError, Sampling, Seam, SeamDiff, SeamMap, Span};
pub use partition::{Metrics, TreeSettings};
pub use quality::{DamageMeter, HammingStat, Quality, Threshold, ThresholdError, Thresholds};
pub use rolling::{Endian, HashRoller};

#[cfg(feature = "subscriber")]
#[cfg_attr(docsrs, doc(cfg(feature = "subscriber")))]
pub use logging::{InitError, init_tracing};
