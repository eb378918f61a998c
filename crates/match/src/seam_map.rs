//! crates/match/src/seam_map.rs
//! Address-ordered collection of non-overlapping seams.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::MatchError;
use crate::seam::Seam;
use crate::span::Span;

/// Non-overlapping seams keyed by start address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeamMap {
    seams: BTreeMap<i64, Seam>,
}

impl SeamMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seams: BTreeMap::new(),
        }
    }

    /// Number of seams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seams.len()
    }

    /// Returns `true` when no seam is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seams.is_empty()
    }

    /// Adds `seam`.
    ///
    /// Empty seams are ignored and reported as `Ok(false)`.
    ///
    /// # Errors
    ///
    /// [`MatchError::OverlappingSeam`] when any stored seam shares a byte
    /// with `seam`; the map is left unchanged.
    pub fn insert(&mut self, seam: Seam) -> Result<bool, MatchError> {
        if seam.is_empty() {
            return Ok(false);
        }
        if let Some(existing) = self.overlapping(seam.span()).next() {
            return Err(MatchError::OverlappingSeam {
                seam,
                existing: *existing,
            });
        }
        self.seams.insert(seam.start(), seam);
        Ok(true)
    }

    /// Removes the seam starting at `start`.
    pub fn remove(&mut self, start: i64) -> Option<Seam> {
        self.seams.remove(&start)
    }

    /// The seam covering `address`.
    #[must_use]
    pub fn covering(&self, address: i64) -> Option<&Seam> {
        self.seams
            .range(..=address)
            .next_back()
            .map(|(_, seam)| seam)
            .filter(|seam| seam.contains(address))
    }

    /// Seams sharing at least one byte with `span`, from the highest down.
    pub fn overlapping(&self, span: Span) -> impl Iterator<Item = &Seam> {
        self.seams
            .range(..span.end)
            .rev()
            .map(|(_, seam)| seam)
            .take_while(move |seam| seam.end() > span.start)
    }

    /// The part of `span` not covered yet.
    ///
    /// Each covering seam is cut away in turn; a seam strictly inside keeps
    /// the longer side.
    #[must_use]
    pub fn trim_to_unique(&self, span: Span) -> Span {
        let mut unique = span;
        while let Some(covered) = self.overlapping(unique).next() {
            unique = unique.subtract(&covered.span());
            if unique.is_empty() {
                break;
            }
        }
        unique
    }

    /// Seams in address order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Seam> + ExactSizeIterator {
        self.seams.values()
    }

    /// Lowest seam.
    #[must_use]
    pub fn first(&self) -> Option<&Seam> {
        self.seams.values().next()
    }

    /// Highest seam.
    #[must_use]
    pub fn last(&self) -> Option<&Seam> {
        self.seams.values().next_back()
    }

    /// Sum of seam lengths.
    #[must_use]
    pub fn covered_bytes(&self) -> i64 {
        self.seams.values().map(Seam::len).sum()
    }

    /// Moves the seams out in address order.
    pub(crate) fn take_sorted(&mut self) -> Vec<Seam> {
        std::mem::take(&mut self.seams).into_values().collect()
    }
}

impl From<Seam> for SeamMap {
    /// A map holding just `seam`, or nothing when it is empty.
    fn from(seam: Seam) -> Self {
        let mut map = Self::new();
        if !seam.is_empty() {
            map.seams.insert(seam.start(), seam);
        }
        map
    }
}

impl<'a> IntoIterator for &'a SeamMap {
    type Item = &'a Seam;
    type IntoIter = std::collections::btree_map::Values<'a, i64, Seam>;

    fn into_iter(self) -> Self::IntoIter {
        self.seams.values()
    }
}

impl fmt::Display for SeamMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seam in self.seams.values() {
            writeln!(f, "{seam}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seam(start: i64, end: i64) -> Seam {
        Seam::new(Span::new(start, end), 2, 0, true)
    }

    #[test]
    fn insert_rejects_overlap_and_keeps_map() {
        let mut map = SeamMap::new();
        assert!(map.insert(seam(0, 10)).unwrap());
        assert!(map.insert(seam(10, 20)).unwrap());
        let err = map.insert(seam(5, 12)).unwrap_err();
        assert!(matches!(err, MatchError::OverlappingSeam { .. }));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn insert_ignores_empty_seams() {
        let mut map = SeamMap::new();
        assert!(!map.insert(seam(4, 4)).unwrap());
        assert!(map.is_empty());
    }

    #[test]
    fn covering_finds_owner() {
        let mut map = SeamMap::new();
        map.insert(seam(0, 10)).unwrap();
        map.insert(seam(20, 30)).unwrap();
        assert_eq!(map.covering(9).map(Seam::start), Some(0));
        assert_eq!(map.covering(10), None);
        assert_eq!(map.covering(25).map(Seam::start), Some(20));
        assert_eq!(map.covering(-1), None);
    }

    #[test]
    fn trim_to_unique_cuts_every_neighbor() {
        let mut map = SeamMap::new();
        map.insert(seam(0, 10)).unwrap();
        map.insert(seam(30, 40)).unwrap();
        assert_eq!(map.trim_to_unique(Span::new(5, 35)), Span::new(10, 30));
        assert_eq!(map.trim_to_unique(Span::new(10, 30)), Span::new(10, 30));
        assert!(map.trim_to_unique(Span::new(2, 8)).is_empty());
    }

    #[test]
    fn remove_and_order() {
        let mut map = SeamMap::new();
        map.insert(seam(20, 30)).unwrap();
        map.insert(seam(0, 10)).unwrap();
        assert_eq!(map.first().map(Seam::start), Some(0));
        assert_eq!(map.last().map(Seam::start), Some(20));
        assert_eq!(map.covered_bytes(), 20);
        assert!(map.remove(0).is_some());
        assert_eq!(map.iter().count(), 1);
    }

    #[test]
    fn single_seam_map() {
        let map = SeamMap::from(seam(4, 12));
        assert_eq!(map.len(), 1);
        assert_eq!(map.covered_bytes(), 8);
        assert!(SeamMap::from(seam(5, 5)).is_empty());
    }
}
