#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Verdicts on how well a modified binary matches its original.
//!
//! - [`Quality`] ranks a comparison from identical to uncorrelated.
//! - [`HammingStat`] totals the differing bytes and bits of a diff.
//! - [`DamageMeter`] turns a diff and its statistics into a [`Quality`]
//!   under tunable [`Thresholds`].
//! - [`summary`] renders the statistics as text.
//!
//! # Examples
//!
//! ```
//! use quality::{Quality, Thresholds};
//!
//! let mut thresholds = Thresholds::default();
//! thresholds.apply("max_outlier=0.25")?;
//! assert!(Quality::DriftAway.is_good());
//! assert!(Quality::DriftSame < Quality::MatchFail);
//! # Ok::<(), quality::ThresholdError>(())
//! ```

mod error;
mod meter;
mod stat;
pub mod summary;
mod thresholds;
mod verdict;

pub use error::ThresholdError;
pub use meter::DamageMeter;
pub use stat::HammingStat;
pub use thresholds::{Threshold, Thresholds};
pub use verdict::{Aggregator, Considerable, Quality};
