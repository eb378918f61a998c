//! crates/match/src/cost.rs
//! Work counters of a comparison.

use std::fmt;
use std::ops::AddAssign;

/// Counters accumulated while sampling and healing.
///
/// `stitches` counts matches (sampled anchors, then healing comparisons);
/// the ratios of [`Display`](fmt::Display) are per stitch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cost {
    offered: u64,
    updated: u64,
    inexact: u64,
    stitches: u64,
    total_bytes: u64,
    mapped: u64,
}

impl Cost {
    /// Empty counters for a modified buffer of `total_bytes`.
    #[must_use]
    pub const fn new(total_bytes: u64) -> Self {
        Self {
            offered: 0,
            updated: 0,
            inexact: 0,
            stitches: 0,
            total_bytes,
            mapped: 0,
        }
    }

    /// Accounts for one nearest neighbor query.
    pub const fn record_mapping_costs(&mut self, distance: u32, offered: u32, updated: u32) {
        self.stitches += 1;
        if distance > 0 {
            self.inexact += 1;
        }
        self.offered += offered as u64;
        self.updated += updated as u64;
    }

    /// Accounts for one fastened gap.
    pub const fn report_healing_costs(&mut self, mismatches: u64, comparisons: u64, adjustments: u64) {
        self.stitches += comparisons;
        self.offered += comparisons;
        self.updated += adjustments;
        self.inexact += mismatches;
    }

    /// Adds bytes now covered by a seam.
    pub const fn record_mapped_bytes(&mut self, bytes: u64) {
        self.mapped += bytes;
    }

    /// Candidate comparisons.
    #[must_use]
    pub const fn offered(&self) -> u64 {
        self.offered
    }

    /// Improvements of a best candidate.
    #[must_use]
    pub const fn updated(&self) -> u64 {
        self.updated
    }

    /// Matches that were not exact.
    #[must_use]
    pub const fn inexact(&self) -> u64 {
        self.inexact
    }

    /// Matches performed.
    #[must_use]
    pub const fn stitches(&self) -> u64 {
        self.stitches
    }

    /// Size of the modified buffer.
    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Bytes covered by seams.
    #[must_use]
    pub const fn mapped(&self) -> u64 {
        self.mapped
    }
}

fn fraction(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, other: Self) {
        self.offered += other.offered;
        self.updated += other.updated;
        self.inexact += other.inexact;
        self.stitches += other.stitches;
        self.total_bytes = self.total_bytes.max(other.total_bytes);
        self.mapped += other.mapped;
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "comparisons={} or {:.4} per match",
            self.offered,
            fraction(self.offered, self.stitches)
        )?;
        writeln!(
            f,
            "refinements={} or {:.4} per match",
            self.updated,
            fraction(self.updated, self.stitches)
        )?;
        writeln!(
            f,
            "approximate matches={} or {:.4}%",
            self.inexact,
            100.0 * fraction(self.inexact, self.stitches)
        )?;
        write!(
            f,
            "mapped={}b or {:.4}% efficiency {:.4}b per offer",
            self.mapped,
            100.0 * fraction(self.mapped, self.total_bytes),
            fraction(self.mapped, self.offered)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_and_healing_accumulate() {
        let mut cost = Cost::new(100);
        cost.record_mapping_costs(0, 10, 2);
        cost.record_mapping_costs(3, 6, 1);
        cost.report_healing_costs(4, 8, 2);
        cost.record_mapped_bytes(50);
        assert_eq!(cost.stitches(), 10);
        assert_eq!(cost.offered(), 24);
        assert_eq!(cost.updated(), 5);
        assert_eq!(cost.inexact(), 5);
        assert_eq!(cost.mapped(), 50);
    }

    #[test]
    fn display_lines() {
        let mut cost = Cost::new(200);
        cost.record_mapping_costs(0, 4, 1);
        cost.record_mapped_bytes(100);
        let text = cost.to_string();
        assert_eq!(
            text,
            "comparisons=4 or 4.0000 per match\n\
             refinements=1 or 1.0000 per match\n\
             approximate matches=0 or 0.0000%\n\
             mapped=100b or 50.0000% efficiency 25.0000b per offer"
        );
    }

    #[test]
    fn empty_cost_renders_zero_ratios() {
        assert!(Cost::default().to_string().contains("0.0000 per match"));
    }
}
