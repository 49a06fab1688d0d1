//! Content-derived seeds and per-call generators.

use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

/// Derive the deterministic seed of a value: the first 32 bits of its
/// SHA-256 digest, read big-endian.
pub fn derive_seed(value: &str) -> u32 {
    let digest = Sha256::digest(value.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// A fresh generator for one transform step. Never shared across values.
#[inline]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
