//! Deterministic random number generation.
//!
//! RULE: nothing in the engine calls a platform RNG. All randomness flows
//! through SessionRng streams derived from the session's master seed, so a
//! replay with the same seed serves the same quiz questions.
//!
//! Each stream is seeded from (master_seed XOR stream_index). Adding a new
//! stream never disturbs existing ones — the slot list is append only.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Stream {
    Quiz = 0,
    // Add new streams here — append only.
}

/// A deterministic RNG stream for a single concern.
pub struct SessionRng {
    inner: Pcg64Mcg,
}

impl SessionRng {
    pub fn new(master_seed: u64, stream: Stream) -> Self {
        let derived = master_seed ^ (stream as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived),
        }
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }
}
