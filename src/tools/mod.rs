//! The tools module provides helpers for the block pipeline.
//!
//! The tools are:
//! - cli: Command line interface for the bwlzw binary.
//! - freq_count: Byte frequency count, used by the BWT reversal.
//! - mtf: Move-To-Front transform.
//! - options: Compression settings and their validation.
//!
pub mod cli;
pub mod freq_count;
pub mod mtf;
pub mod options;

/// Deterministic xorshift bytes for tests.
#[cfg(test)]
pub(crate) fn pseudo_random(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(0x9e37_79b9_7f4a_7c15) | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}
