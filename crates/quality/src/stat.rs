//! crates/quality/src/stat.rs
//! Hamming totals of a diff.

use matching::frame::FramePair;
use matching::{Hamming, Seam, SeamDiff, SeamMap};

/// Mismatch totals per seam group, plus a side-by-side control.
///
/// `control` compares the two buffers from offset zero, ignoring seams; its
/// common and unique counts give the length of the longer buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HammingStat {
    control: Hamming,
    ordered: Hamming,
    oo_order: Hamming,
    overall: Hamming,
    sub_ordered: Vec<(Seam, Hamming)>,
    sub_oo_order: Vec<(Seam, Hamming)>,
}

impl HammingStat {
    /// Compares every seam of `seams` with its counterpart.
    #[must_use]
    pub fn new(seams: &SeamMap, original: &[u8], modified: &[u8]) -> Self {
        let mut stat = Self::default();
        let mut partials = Vec::with_capacity(seams.len());
        Hamming::new().add_seams(seams, original, modified, |seam, partial| {
            partials.push((*seam, *partial));
        });
        for (seam, partial) in partials {
            if seam.is_main_sequence() {
                stat.ordered += partial;
                stat.sub_ordered.push((seam, partial));
            } else {
                stat.oo_order += partial;
                stat.sub_oo_order.push((seam, partial));
            }
        }
        stat.overall = stat.ordered + stat.oo_order;
        stat.control.compare(modified, original);
        stat
    }

    /// Statistics of every seam of `diff`.
    #[must_use]
    pub fn of_diff(diff: &SeamDiff, original: &[u8], modified: &[u8]) -> Self {
        Self::new(diff.overall(), original, modified)
    }

    /// Statistics of the trivial diff pairing both frames byte for byte.
    #[must_use]
    pub fn side_by_side(pair: &FramePair<'_>, step: u32) -> Self {
        let seams = SeamMap::from(pair.side_by_side(step));
        Self::new(&seams, pair.original().bytes(), pair.modified().bytes())
    }

    /// Both buffers compared from offset zero.
    #[must_use]
    pub const fn control(&self) -> &Hamming {
        &self.control
    }

    /// Main-sequence totals.
    #[must_use]
    pub const fn ordered(&self) -> &Hamming {
        &self.ordered
    }

    /// Displaced totals.
    #[must_use]
    pub const fn oo_order(&self) -> &Hamming {
        &self.oo_order
    }

    /// All seams.
    #[must_use]
    pub const fn overall(&self) -> &Hamming {
        &self.overall
    }

    /// Per-seam totals of the main sequence, in address order.
    #[must_use]
    pub fn sub_ordered(&self) -> &[(Seam, Hamming)] {
        &self.sub_ordered
    }

    /// Per-seam totals of displaced seams, in address order.
    #[must_use]
    pub fn sub_oo_order(&self) -> &[(Seam, Hamming)] {
        &self.sub_oo_order
    }

    /// Length of the longer buffer.
    #[must_use]
    pub const fn longer_length(&self) -> u64 {
        self.control.common() + self.control.unique()
    }
}
