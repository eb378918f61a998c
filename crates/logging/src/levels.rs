//! crates/logging/src/levels.rs
//! Subsystem identifiers and their verbosity levels.

use std::fmt;

/// Engine subsystems that emit diagnostics under their own tracing target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Subsystem {
    /// Fingerprint generation.
    Hash,
    /// Metric tree construction and queries.
    Index,
    /// Anchor sampling, grouping and seam registration.
    Seam,
    /// Gap healing between adjacent seams.
    Heal,
    /// Quality assessment.
    Quality,
    /// Batch comparisons against one shared original.
    Batch,
}

impl Subsystem {
    /// Every subsystem, in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Hash,
        Self::Index,
        Self::Seam,
        Self::Heal,
        Self::Quality,
        Self::Batch,
    ];

    /// Short flag name used on the command line and in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Index => "index",
            Self::Seam => "seam",
            Self::Heal => "heal",
            Self::Quality => "quality",
            Self::Batch => "batch",
        }
    }

    /// Tracing target used by the matching `trace_*!` macro.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Hash => "exediff::hash",
            Self::Index => "exediff::index",
            Self::Seam => "exediff::seam",
            Self::Heal => "exediff::heal",
            Self::Quality => "exediff::quality",
            Self::Batch => "exediff::batch",
        }
    }

    /// Looks a subsystem up by its flag name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Maps a tracing target back to the subsystem that owns it.
    #[must_use]
    pub fn from_target(target: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| target == s.target() || target.starts_with(&format!("{}::", s.target())))
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verbosity level per subsystem.
///
/// `0` silences the subsystem, `1` keeps info events, `2` adds debug events and
/// `3` or more enables trace events.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubsystemLevels {
    /// Fingerprint generation level.
    pub hash: u8,
    /// Metric tree level.
    pub index: u8,
    /// Seam builder level.
    pub seam: u8,
    /// Gap healing level.
    pub heal: u8,
    /// Quality assessment level.
    pub quality: u8,
    /// Batch comparison level.
    pub batch: u8,
}

impl SubsystemLevels {
    /// Get the level for a specific subsystem.
    pub const fn get(&self, subsystem: Subsystem) -> u8 {
        match subsystem {
            Subsystem::Hash => self.hash,
            Subsystem::Index => self.index,
            Subsystem::Seam => self.seam,
            Subsystem::Heal => self.heal,
            Subsystem::Quality => self.quality,
            Subsystem::Batch => self.batch,
        }
    }

    /// Set the level for a specific subsystem.
    pub fn set(&mut self, subsystem: Subsystem, level: u8) {
        match subsystem {
            Subsystem::Hash => self.hash = level,
            Subsystem::Index => self.index = level,
            Subsystem::Seam => self.seam = level,
            Subsystem::Heal => self.heal = level,
            Subsystem::Quality => self.quality = level,
            Subsystem::Batch => self.batch = level,
        }
    }

    /// Sets every subsystem to `level`.
    pub fn set_all(&mut self, level: u8) {
        for subsystem in Subsystem::ALL {
            self.set(subsystem, level);
        }
    }
}

/// Name of the `EnvFilter` level that admits events up to `level`.
#[must_use]
pub const fn filter_name(level: u8) -> &'static str {
    match level {
        0 => "off",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
