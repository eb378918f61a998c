//! crates/test-support/src/lib.rs
//! Deterministic buffer fixtures for tests and benches.
//!
//! Every generator takes an explicit seed so scenarios reproduce exactly
//! across runs and machines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniformly random bytes.
#[must_use]
pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = vec![0u8; len];
    rng.fill(bytes.as_mut_slice());
    bytes
}

/// Random little-endian halfwords drawn from a small vocabulary.
///
/// Mimics machine code, where a few opcodes dominate, so fingerprints of
/// unrelated regions still land at moderate distances from each other.
#[must_use]
pub fn code_like(seed: u64, len: usize) -> Vec<u8> {
    const OPCODES: [u16; 12] = [
        0xb580, 0xaf00, 0x4618, 0x6800, 0x2000, 0xbd80, 0xf000, 0xf800, 0x4770, 0x3001, 0x6018,
        0xe7fe,
    ];
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = Vec::with_capacity(len + 1);
    while bytes.len() < len {
        let op = if rng.gen_bool(0.75) {
            OPCODES[rng.gen_range(0..OPCODES.len())]
        } else {
            rng.r#gen()
        };
        bytes.extend_from_slice(&op.to_le_bytes());
    }
    bytes.truncate(len);
    bytes
}

/// Copy of `original` with `inserted` spliced in at `offset`.
#[must_use]
pub fn insert_bytes(original: &[u8], offset: usize, inserted: &[u8]) -> Vec<u8> {
    let mut modified = Vec::with_capacity(original.len() + inserted.len());
    modified.extend_from_slice(&original[..offset]);
    modified.extend_from_slice(inserted);
    modified.extend_from_slice(&original[offset..]);
    modified
}

/// Copy of `original` without `len` bytes at `offset`.
#[must_use]
pub fn delete_bytes(original: &[u8], offset: usize, len: usize) -> Vec<u8> {
    let mut modified = original[..offset].to_vec();
    modified.extend_from_slice(&original[offset + len..]);
    modified
}

/// Copy of `original` with bytes at `offset` replaced by `patch`.
#[must_use]
pub fn overwrite_bytes(original: &[u8], offset: usize, patch: &[u8]) -> Vec<u8> {
    let mut modified = original.to_vec();
    modified[offset..offset + patch.len()].copy_from_slice(patch);
    modified
}
