//! RNG module - deterministic tile kind generation
//!
//! A simple LCG keeps boards reproducible from a seed, which the tests and the
//! `dump` command rely on.

use crate::types::TileKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period,
    /// which shows up as visible stripes when `max` is small.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Uniform tile kind in `[0, kind_count)`
    pub fn next_kind(&mut self, kind_count: u8) -> TileKind {
        self.next_range(kind_count as u32) as TileKind
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
