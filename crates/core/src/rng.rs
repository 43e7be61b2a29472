//! RNG module - deck shuffling
//!
//! A deck is the fixed multiset `{1,1,2,2,3,3}` of sound ids, Fisher-Yates
//! shuffled with a small LCG so that a seed fully determines every deal of a
//! session (restarts keep drawing from the same generator).

use crate::types::{SoundId, TILE_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { seed, state }
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of a power-of-two LCG cycle with short periods.
        (self.next_u32() >> 8) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// The unshuffled deck: every sound exactly twice.
pub const SORTED_DECK: [SoundId; TILE_COUNT] = [
    SoundId::Dog,
    SoundId::Dog,
    SoundId::Cat,
    SoundId::Cat,
    SoundId::Bird,
    SoundId::Bird,
];

/// Deal a freshly shuffled deck in board order.
pub fn deal_deck(rng: &mut SimpleRng) -> [SoundId; TILE_COUNT] {
    let mut deck = SORTED_DECK;
    rng.shuffle(&mut deck);
    deck
}

/// Check that a deck holds each sound exactly twice.
pub fn is_valid_deck(deck: &[SoundId]) -> bool {
    deck.len() == TILE_COUNT
        && SoundId::ALL
            .iter()
            .all(|s| deck.iter().filter(|d| *d == s).count() == 2)
}
