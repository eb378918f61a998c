//! crates/match/src/diff/heal.rs
//! Closing the gaps between registered seams.

use logging::trace_heal;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::SeamDiff;
use crate::cost::Cost;
use crate::error::MatchError;
use crate::hamming::Hamming;
use crate::seam::Seam;
use crate::span::Span;

impl SeamDiff {
    /// Grows seams over the unmatched bytes around and between them.
    ///
    /// Neighbors with the same translation merge. Neighbors whose
    /// translations differ meet at the step boundary where the bits they
    /// disagree with are balanced best. For two main-sequence seams whose
    /// translation decreases, the meeting point is searched in the original
    /// buffer instead, and nothing is done when their counterparts overlap
    /// there. The first and last seams reach out to the buffer edges as far
    /// as both sides allow.
    ///
    /// # Errors
    ///
    /// [`MatchError::NegativeGap`] if two neighbors overlap.
    #[cfg_attr(
        feature = "tracing",
        instrument(skip_all, name = "heal_gaps", fields(seams = self.overall.len()))
    )]
    pub fn heal_gaps(
        &mut self,
        cost: &mut Cost,
        original: &[u8],
        modified: &[u8],
    ) -> Result<(), MatchError> {
        let seams = self.overall.take_sorted();
        let Some((&first, rest)) = seams.split_first() else {
            return self.replace_seams(seams);
        };

        let mut prev = first;
        if prev.is_main_sequence() {
            let head = prev.start().min(prev.start() + prev.translation());
            if head > 0 {
                prev.set_start(prev.start() - head);
                cost.record_mapped_bytes(head as u64);
            }
        }

        let mut healed = Vec::with_capacity(seams.len());
        for &seam in rest {
            let mut next = seam;
            if prev.translation() == next.translation() {
                cost.record_mapped_bytes((next.start() - prev.end()).max(0) as u64);
                prev.set_end(next.end());
                continue;
            }

            if prev.is_main_sequence()
                && next.is_main_sequence()
                && prev.translation() > next.translation()
            {
                let mut prev_inverse = prev.inverse();
                let mut next_inverse = next.inverse();
                if prev_inverse.end() < next_inverse.start() {
                    fasten(cost, modified, original, &mut prev_inverse, &mut next_inverse)?;
                }
                prev = prev_inverse.inverse();
                next = next_inverse.inverse();
            } else {
                fasten(cost, original, modified, &mut prev, &mut next)?;
            }
            healed.push(prev);
            prev = next;
        }

        if prev.is_main_sequence() {
            let tail = (modified.len() as i64 - prev.end())
                .min(original.len() as i64 - (prev.end() + prev.translation()));
            if tail > 0 {
                prev.set_end(prev.end() + tail);
                cost.record_mapped_bytes(tail as u64);
            }
        }
        healed.push(prev);
        self.replace_seams(healed)
    }

    /// Heals with fresh counters and returns them.
    ///
    /// # Errors
    ///
    /// As [`heal_gaps`](Self::heal_gaps).
    pub fn heal(&mut self, original: &[u8], modified: &[u8]) -> Result<Cost, MatchError> {
        let mut cost = self.new_blank_cost();
        self.heal_gaps(&mut cost, original, modified)?;
        Ok(cost)
    }
}

/// Moves `prev.end` and `next.start` to a common point inside their gap.
///
/// Spans index `current`; translated positions index `reference`. The gap
/// is first clipped to positions valid under both translations. Both seams
/// grow up to the clipped bounds; when those bounds cross, nothing is valid
/// for both and the seams are left alone.
fn fasten(
    cost: &mut Cost,
    reference: &[u8],
    current: &[u8],
    prev: &mut Seam,
    next: &mut Seam,
) -> Result<(), MatchError> {
    let gap = next.start() - prev.end();
    if gap < 0 {
        return Err(MatchError::NegativeGap {
            prev: *prev,
            next: *next,
            gap,
        });
    }

    let (to_prev, to_next) = (prev.translation(), next.translation());
    let limit = reference.len() as i64;
    let low = prev.end().max(0).max(-to_prev).max(-to_next);
    let high = next
        .start()
        .min(current.len() as i64)
        .min(limit - to_prev)
        .min(limit - to_next);
    if low > high {
        return Ok(());
    }
    let window = Span::new(low, high);
    let meet = if window.is_empty() {
        low
    } else {
        scan(cost, reference, current, prev, next, window)
    };
    trace_heal!(gap, meet, "fastened");

    if meet != prev.end() {
        cost.record_mapped_bytes((meet - prev.end()) as u64);
        prev.set_end(meet);
    }
    if meet != next.start() {
        cost.record_mapped_bytes((next.start() - meet) as u64);
        next.set_start(meet);
    }
    Ok(())
}

/// Picks the step boundary in `window` where `next` starts matching better
/// than `prev`, by differing bits.
fn scan(
    cost: &mut Cost,
    reference: &[u8],
    current: &[u8],
    prev: &Seam,
    next: &Seam,
    window: Span,
) -> i64 {
    let step = i64::from(prev.step().max(1));
    let (to_prev, to_next) = (prev.translation(), next.translation());
    let mut by_prev = Hamming::new();
    let mut by_next = Hamming::new();
    let mut meet = window.start;
    let mut best = 0i64;
    let (mut inexact_prev, mut inexact_next) = (0, 0);
    let (mut comparisons, mut adjustments) = (0u64, 0u64);

    // Meeting at `pos` gives prev the bytes below it and next the rest.
    for pos in window.start..=window.end {
        if pos % step == 0 {
            comparisons += 1;
            let balance = by_prev.digits() as i64 - by_next.digits() as i64;
            if balance < best {
                best = balance;
                meet = pos;
                inexact_prev = by_prev.octets();
                inexact_next = by_next.octets();
                adjustments += 1;
            }
        }
        if pos < window.end {
            let byte = current[pos as usize];
            by_prev.post_byte(byte ^ reference[(pos + to_prev) as usize]);
            by_next.post_byte(byte ^ reference[(pos + to_next) as usize]);
        }
    }

    let mismatches = by_next.octets() - inexact_next + inexact_prev;
    cost.report_healing_costs(mismatches, comparisons, adjustments);
    trace_heal!(comparisons, mismatches, "scanned gap");
    meet
}
