//! src/comparison.rs
//! Outcome of one comparison and its text report.

use std::fmt::{self, Write};

use matching::{Cost, SeamDiff};
use quality::{HammingStat, Quality, summary};

const SEPARATOR: &str =
    "====================================================================";

/// Seams, statistics and verdict for one modified buffer.
#[derive(Clone, Debug)]
pub struct Comparison {
    pub(crate) diff: SeamDiff,
    pub(crate) healing: Option<Cost>,
    pub(crate) stats: HammingStat,
    pub(crate) quality: Quality,
}

impl Comparison {
    /// The seams.
    #[must_use]
    pub const fn diff(&self) -> &SeamDiff {
        &self.diff
    }

    /// Cost of sampling.
    #[must_use]
    pub const fn base_cost(&self) -> &Cost {
        self.diff.base_cost()
    }

    /// Cost of healing, when it ran.
    #[must_use]
    pub const fn healing_cost(&self) -> Option<&Cost> {
        self.healing.as_ref()
    }

    /// Mismatch totals.
    #[must_use]
    pub const fn stats(&self) -> &HammingStat {
        &self.stats
    }

    /// Verdict.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Shorthand for `quality().is_good()`.
    #[must_use]
    pub const fn is_good(&self) -> bool {
        self.quality.is_good()
    }

    /// Writes the verdict, the seams, the statistics and the costs.
    pub fn write_report(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "Quality: {}", self.quality)?;
        writeln!(out, "{SEPARATOR}")?;
        writeln!(
            out,
            "Mapping: {} ordered, {} displaced",
            self.diff.ordered().len(),
            self.diff.oo_order().len()
        )?;
        write!(out, "{}", self.diff.overall())?;
        summary::outlier_percents(out, &self.diff)?;
        summary::bulk_mapped_bytes(out, &self.stats)?;
        writeln!(out, "Hamming:")?;
        summary::detailed_hamming(out, &self.stats)?;
        writeln!(out, "Costs of sequential (coarse) match:")?;
        writeln!(out, "{}", self.diff.base_cost())?;
        if let Some(healing) = &self.healing {
            writeln!(out, "Costs of refinement (greedy) match:")?;
            writeln!(out, "{healing}")?;
        }
        Ok(())
    }

    /// The report as a string.
    #[must_use]
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_report(f)
    }
}
