//! crates/partition/src/lms.rs
//! Longest monotonic subsequence by patience sorting.
//!
//! Values are compared as `(value, index)` pairs, so equal values are
//! accepted in index order and the result is the longest non-decreasing
//! subsequence. Runs in `O(n log n)` with scratch space reused across calls.

use crate::error::LmsError;

/// Reusable solver for inputs up to a fixed capacity.
#[derive(Clone, Debug)]
pub struct Lms {
    capacity: usize,
    /// Smallest key ending a subsequence of each length.
    tails: Vec<i64>,
    /// Input position holding each tail.
    tail_at: Vec<usize>,
    /// Predecessor of each input position in its best subsequence.
    behind: Vec<Option<usize>>,
    len: usize,
}

#[inline]
fn key(value: i32, index: usize) -> i64 {
    (i64::from(value) << 32) + index as i64
}

impl Lms {
    /// Creates a solver for inputs of at most `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            tails: Vec::with_capacity(capacity),
            tail_at: Vec::with_capacity(capacity),
            behind: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Largest accepted input.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Length of the last solution.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the last input was empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Solves `input`, returning the subsequence length.
    pub fn solve(&mut self, input: &[i32]) -> Result<usize, LmsError> {
        if input.len() > self.capacity {
            return Err(LmsError::CapacityExceeded {
                len: input.len(),
                capacity: self.capacity,
            });
        }

        self.tails.clear();
        self.tail_at.clear();
        self.behind.clear();

        for (index, &value) in input.iter().enumerate() {
            let key = key(value, index);
            let pile = self.tails.partition_point(|&tail| tail < key);
            self.behind.push(pile.checked_sub(1).map(|below| self.tail_at[below]));
            if pile == self.tails.len() {
                self.tails.push(key);
                self.tail_at.push(index);
            } else {
                self.tails[pile] = key;
                self.tail_at[pile] = index;
            }
        }

        self.len = self.tails.len();
        Ok(self.len)
    }

    /// Input positions of the last solution, ascending.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.len);
        let mut cursor = self.tail_at.last().copied();
        while let Some(index) = cursor {
            indices.push(index);
            cursor = self.behind[index];
        }
        indices.reverse();
        indices
    }

    /// Values of the last solution, in order.
    ///
    /// `input` must be the slice passed to [`solve`](Self::solve).
    #[must_use]
    pub fn values(&self, input: &[i32]) -> Vec<i32> {
        self.indices().into_iter().map(|index| input[index]).collect()
    }

    /// Membership mask over the last input: `true` where the position belongs
    /// to the solution.
    #[must_use]
    pub fn membership(&self) -> Vec<bool> {
        let mut mask = vec![false; self.behind.len()];
        for index in self.indices() {
            mask[index] = true;
        }
        mask
    }
}

/// Positions of a longest non-decreasing subsequence of `input`.
#[must_use]
pub fn longest_monotonic(input: &[i32]) -> Vec<usize> {
    let mut lms = Lms::with_capacity(input.len());
    match lms.solve(input) {
        Ok(_) => lms.indices(),
        Err(_) => Vec::new(),
    }
}
