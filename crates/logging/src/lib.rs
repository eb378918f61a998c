#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `logging` gives every stage of the matching engine its own tracing target
//! (`exediff::hash`, `exediff::index`, `exediff::seam`, `exediff::heal`,
//! `exediff::quality`, `exediff::batch`) and a [`VerbosityConfig`] that maps
//! a single verbose level, or individual flag tokens like `heal2`, onto
//! per-target levels.
//!
//! # Design
//!
//! Library crates emit events through the `trace_*!` macros and never
//! install a subscriber. With the `subscriber` feature, [`init_tracing`]
//! turns a configuration into an `EnvFilter` and installs a fmt subscriber.
//!
//! # Examples
//!
//! ```
//! use logging::{Subsystem, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_flags("heal2,index").unwrap();
//! assert_eq!(config.level(Subsystem::Heal), 2);
//! assert!(config.directive().contains("exediff::heal=debug"));
//! ```

mod config;
mod levels;
mod tracing_macros;

#[cfg(feature = "subscriber")]
mod tracing_bridge;

pub use config::{FlagError, MAX_LEVEL, VerbosityConfig};
pub use levels::{Subsystem, SubsystemLevels, filter_name};

#[cfg(feature = "subscriber")]
#[cfg_attr(docsrs, doc(cfg(feature = "subscriber")))]
pub use tracing_bridge::{InitError, env_filter, init_tracing};

#[doc(hidden)]
pub use tracing as __tracing;
