//! crates/quality/src/summary.rs
//! Plain-text statistics.

use std::fmt::{self, Write};

use matching::SeamDiff;

use crate::stat::HammingStat;

fn percents(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

/// Bytes covered by main-sequence, displaced and all seams.
pub fn bulk_mapped_bytes(out: &mut impl Write, stat: &HammingStat) -> fmt::Result {
    let ordered = stat.ordered().common();
    let displaced = stat.oo_order().common();
    let all = ordered + displaced;
    let length = stat.longer_length();
    writeln!(
        out,
        "Monotonic matches: {ordered} bytes ({:.4}%)",
        percents(ordered, length)
    )?;
    writeln!(
        out,
        "Displaced matches: {displaced} bytes ({:.4}%)",
        percents(displaced, length)
    )?;
    writeln!(
        out,
        "All matches found: {all} bytes ({:.4}%)",
        percents(all, length)
    )
}

/// One line per Hamming group.
pub fn detailed_hamming(out: &mut impl Write, stat: &HammingStat) -> fmt::Result {
    writeln!(out, "control={}", stat.control())?;
    writeln!(out, "ordered={}", stat.ordered())?;
    writeln!(out, "ooOrder={}", stat.oo_order())?;
    writeln!(out, "overall={}", stat.overall())
}

/// Share of anchors no neighbor confirmed.
pub fn outlier_percents(out: &mut impl Write, diff: &SeamDiff) -> fmt::Result {
    let outliers = diff.outlier_count() as u64;
    let stitches = diff.stitch_count() as u64;
    writeln!(
        out,
        "{outliers} of {stitches}, or {:.4}% unconfirmed matches",
        percents(outliers, stitches)
    )
}

#[cfg(test)]
mod tests {
    use matching::{Seam, SeamMap, Span};

    use super::*;

    #[test]
    fn bulk_lines() {
        let bytes = [0u8; 8];
        let mut seams = SeamMap::new();
        seams.insert(Seam::new(Span::new(0, 6), 2, 0, true)).unwrap();
        let stat = HammingStat::new(&seams, &bytes, &bytes);

        let mut text = String::new();
        bulk_mapped_bytes(&mut text, &stat).unwrap();
        assert_eq!(
            text,
            "Monotonic matches: 6 bytes (75.0000%)\n\
             Displaced matches: 0 bytes (0.0000%)\n\
             All matches found: 6 bytes (75.0000%)\n"
        );
    }

    #[test]
    fn hamming_lines() {
        let stat = HammingStat::default();
        let mut text = String::new();
        detailed_hamming(&mut text, &stat).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("control={common=0 unique=0 !> bytes=0 bits=0}"));
    }
}
