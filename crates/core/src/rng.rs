//! RNG module - seeded piece and garbage-gap selection
//!
//! Pieces are drawn uniformly and independently from the seven kinds; there
//! is no bag. A small LCG keeps every session reproducible from its seed.

use crate::types::{PieceKind, BOARD_WIDTH};

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Uniformly random piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Uniformly random column for a garbage gap
    pub fn next_gap(&mut self) -> usize {
        self.next_range(BOARD_WIDTH as u32) as usize
    }

    /// Current state, usable as a seed to replay from here
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
