//! Legacy seeded stream.
//!
//! Every procedural choice in city, dungeon and wilderness generation draws from this
//! generator. The transform is fixed: changing it changes every generated world, so it is not
//! interchangeable with `rand` generators.

use serde::{Deserialize, Serialize};

const MULTIPLIER: u32 = 7_143_469;
const INCREMENT: u32 = 1;

/// Deterministic 32-bit linear congruential stream producing 16-bit draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArenaRandom {
    value: u32,
}

impl ArenaRandom {
    /// Seed used when no explicit seed is supplied.
    pub const DEFAULT_SEED: u32 = 12345;

    /// Create a stream starting from `seed`.
    pub const fn new(seed: u32) -> Self {
        Self { value: seed }
    }

    /// Reset the stream state.
    pub fn srand(&mut self, seed: u32) {
        self.value = seed;
    }

    /// Current state. Re-seeding with this value resumes the same sequence.
    pub const fn seed(&self) -> u32 {
        self.value
    }

    /// Advance the stream and return the next draw in `0..=0xFFFF`.
    pub fn next(&mut self) -> u32 {
        self.value = self.value.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.value >> 16) & 0xFFFF
    }

    /// Draw `next() % modulus`. `modulus` must be non-zero.
    pub fn next_mod(&mut self, modulus: u32) -> u32 {
        debug_assert!(modulus > 0, "modulus must be non-zero");
        self.next() % modulus
    }
}

impl Default for ArenaRandom {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}
