//! Snapshot module - plain-data copies of the game for rendering
//!
//! A [`GameSnapshot`] is `Copy` and fixed-size, so a frontend can refresh one
//! in place every frame with [`GameState::snapshot_into`] without allocating.
//!
//! [`GameState::snapshot_into`]: crate::GameState::snapshot_into

use crate::game_state::TurnPhase;
use crate::types::{SoundId, TileState, TILE_COUNT};

/// One tile as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub sound: SoundId,
    pub revealed: bool,
    pub matched: bool,
    pub selected: bool,
}

impl TileSnapshot {
    pub fn state(&self) -> TileState {
        TileState::of(self.matched, self.selected)
    }
}

impl Default for TileSnapshot {
    fn default() -> Self {
        Self {
            sound: SoundId::Dog,
            revealed: false,
            matched: false,
            selected: false,
        }
    }
}

/// Copyable view of the game for renderers and observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub tiles: [TileSnapshot; TILE_COUNT],
    pub score: u32,
    pub matches: u8,
    pub focus: usize,
    pub complete: bool,
    pub phase: TurnPhase,
    pub generation: u32,
    pub seed: u32,
}

impl GameSnapshot {
    /// Whether selections can currently be made.
    pub fn playable(&self) -> bool {
        matches!(self.phase, TurnPhase::Idle | TurnPhase::OneSelected)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            tiles: [TileSnapshot::default(); TILE_COUNT],
            score: 0,
            matches: 0,
            focus: 0,
            complete: false,
            phase: TurnPhase::Idle,
            generation: 0,
            seed: 0,
        }
    }
}
