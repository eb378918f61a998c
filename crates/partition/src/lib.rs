#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Metric-space partitioning for approximate fingerprint matching.
//!
//! # Overview
//!
//! - [`Metrics`] are the distance functions between 64-bit fingerprints.
//! - [`MetricTree`] is a vantage-point tree answering exact nearest neighbor
//!   queries under any [`Metric`], built once and shared read-only.
//! - [`Lms`] extracts a longest non-decreasing subsequence, which separates
//!   consistently drifting matches from displaced ones.
//!
//! # Examples
//!
//! ```
//! use partition::{MetricTree, Metrics};
//!
//! let tree = MetricTree::from_slice(&[0x10, 0x20, 0x40, 0x80], Metrics::BitCount).unwrap();
//! let found = tree.nearest(0x41, None);
//! assert_eq!(found.index(), Some(2));
//! assert_eq!(found.distance(), 1);
//! ```

mod error;
mod lms;
mod metric;
mod tree;

pub use error::{LmsError, TreeError};
pub use lms::{Lms, longest_monotonic};
pub use metric::{Metric, Metrics};
pub use tree::{Match, MetricTree, TreeSettings};
