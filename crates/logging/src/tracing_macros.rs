//! crates/logging/src/tracing_macros.rs
//! Convenience macros for engine-specific tracing.
//!
//! These macros provide ergonomic wrappers around standard tracing macros
//! with the target of each engine subsystem, so callers do not need their
//! own `tracing` dependency.

/// Emit a fingerprint generation trace.
///
/// # Example
/// ```ignore
/// trace_hash!("indexed {} fingerprints", count);
/// ```
#[macro_export]
macro_rules! trace_hash {
    ($($arg:tt)*) => {
        $crate::__tracing::trace!(target: "exediff::hash", $($arg)*);
    };
}

/// Emit a metric tree trace.
///
/// # Example
/// ```ignore
/// trace_index!("built tree: {} nodes", nodes);
/// ```
#[macro_export]
macro_rules! trace_index {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!(target: "exediff::index", $($arg)*);
    };
}

/// Emit a seam builder summary at info, visible from verbose level 1.
///
/// # Example
/// ```ignore
/// trace_seam!(ordered = 2, "built seams");
/// ```
#[macro_export]
macro_rules! trace_seam {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "exediff::seam", $($arg)*);
    };
}

/// Emit a gap healing trace.
///
/// # Example
/// ```ignore
/// trace_heal!("fastened gap at {:#x}", offset);
/// ```
#[macro_export]
macro_rules! trace_heal {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!(target: "exediff::heal", $($arg)*);
    };
}

/// Emit a quality verdict trace.
///
/// # Example
/// ```ignore
/// trace_quality!("verdict {}", quality);
/// ```
#[macro_export]
macro_rules! trace_quality {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "exediff::quality", $($arg)*);
    };
}

/// Emit a batch comparison trace.
///
/// # Example
/// ```ignore
/// trace_batch!("compared {} targets", count);
/// ```
#[macro_export]
macro_rules! trace_batch {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "exediff::batch", $($arg)*);
    };
}
