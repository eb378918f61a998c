//! crates/rolling/src/tamien.rs
//! The Tamien window hash.
//!
//! Two 64-bit accumulators summarize a sliding window of 32-bit values:
//!
//! - the *multiset* accumulator XORs a small family of bits per value in and
//!   out of the window. It behaves like a Bloom filter over the values the
//!   window currently holds and ignores their order.
//! - the *positional* accumulator XORs the family of the complemented value
//!   and shifts left once per value, so each contribution remembers its age.
//!
//! The fingerprint is the XOR of both. Local reordering changes only the
//! positional half, a single replaced value changes both halves, and a shift
//! of the whole window changes nearly every positional bit.

/// Knuth's multiplicative hash, `v * (v + 3) mod m`, with 32-bit wrapping
/// arithmetic and a truncating remainder.
#[inline]
const fn knuth(value: i32, modulo: i32) -> i32 {
    value.wrapping_mul(value.wrapping_add(3)) % modulo
}

/// ORs one bit per consecutive value starting at `value`.
///
/// Negative hash results select a bit by their low six bits, the same way a
/// 64-bit shift count is masked.
#[inline]
const fn family(value: i32, bits: u32, modulo: i32) -> u64 {
    let mut family = 0u64;
    let mut offset = 0;
    while offset < bits {
        let bit = knuth(value.wrapping_add(offset as i32), modulo) & 63;
        family |= 1u64 << bit;
        offset += 1;
    }
    family
}

/// Sliding window hash over 32-bit values.
#[derive(Clone, Debug)]
pub struct Tamien {
    plain_bits: u32,
    whirl_bits: u32,
    history: Box<[i32]>,
    next: usize,
    filled: usize,
    positional: u64,
    multiset: u64,
}

impl Tamien {
    /// Creates an empty window of `window` values.
    ///
    /// `plain_bits` bits are set per value in the multiset accumulator and
    /// `whirl_bits` bits in the positional one.
    #[must_use]
    pub fn new(plain_bits: u32, whirl_bits: u32, window: usize) -> Self {
        Self {
            plain_bits,
            whirl_bits,
            history: vec![0; window].into_boxed_slice(),
            next: 0,
            filled: 0,
            positional: 0,
            multiset: 0,
        }
    }

    /// Number of values the window holds once warm.
    #[inline]
    #[must_use]
    pub fn window(&self) -> usize {
        self.history.len()
    }

    /// Pushes a value, evicting the oldest one when the window is full.
    pub fn put(&mut self, value: i32) {
        let window = self.history.len();
        if window > 0 {
            if self.filled == window {
                let oldest = self.history[self.next];
                self.remove(oldest, window);
            } else {
                self.filled += 1;
            }
        }

        self.multiset ^= family(value, self.plain_bits, 64);
        self.positional ^= family(!value, self.whirl_bits, 32);
        self.positional <<= 1;

        if window > 0 {
            self.history[self.next] = value;
            self.next = (self.next + 1) % window;
        }
    }

    /// Takes back a value put `age` puts ago.
    ///
    /// Contributions older than 64 puts have already shifted out of the
    /// positional accumulator and only the multiset part is undone.
    pub fn remove(&mut self, value: i32, age: usize) {
        self.multiset ^= family(value, self.plain_bits, 64);
        if age < 64 {
            self.positional ^= family(!value, self.whirl_bits, 32) << age;
        }
    }

    /// Forgets every value.
    pub fn clear(&mut self) {
        self.next = 0;
        self.filled = 0;
        self.positional = 0;
        self.multiset = 0;
    }

    /// Returns `true` until the window has been filled once.
    #[inline]
    #[must_use]
    pub fn is_warming_up(&self) -> bool {
        !self.history.is_empty() && self.filled < self.history.len()
    }

    /// Current fingerprint.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.positional ^ self.multiset
    }
}
