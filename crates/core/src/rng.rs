//! RNG module - deterministic random source for the board
//!
//! Every random decision the board makes (initial fill, refill, shuffle) is
//! drawn from a single seeded LCG so that a seed plus a click sequence fully
//! determines a game.

use tile_blast_types::TileType;

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
    /// Maps through the high bits: the low bits of a power-of-two LCG have a
    /// short period (bit 0 simply alternates), which would turn a two-colour
    /// palette into a checkerboard.
    pub fn next_range(&mut self, max: u32) -> u32 {
        assert!(max > 0, "next_range called with max == 0");
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick a uniformly random entry of a non-empty palette
    pub fn pick(&mut self, palette: &[TileType]) -> TileType {
        palette[self.next_range(palette.len() as u32) as usize]
    }

    /// Shuffle a slice using Fisher-Yates, drawing `next_range(i + 1)` for
    /// each index from the last down to 1
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
