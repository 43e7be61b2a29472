//! Board module - the six tiles and focus arithmetic
//!
//! Tiles are stored in board order; a tile's `id` is its index and never changes
//! for the lifetime of a game.

use crate::types::{Direction, SoundId, TILE_COUNT};

/// One cell of the 3x2 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: usize,
    pub sound: SoundId,
    pub revealed: bool,
    pub matched: bool,
}

impl Tile {
    pub fn new(id: usize, sound: SoundId) -> Self {
        Self {
            id,
            sound,
            revealed: false,
            matched: false,
        }
    }
}

/// The fixed set of tiles of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Tile; TILE_COUNT],
}

impl Board {
    /// Lay out a deck in board order.
    pub fn from_deck(deck: [SoundId; TILE_COUNT]) -> Self {
        let mut id = 0;
        let tiles = deck.map(|sound| {
            let tile = Tile::new(id, sound);
            id += 1;
            tile
        });
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile; TILE_COUNT] {
        &self.tiles
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    /// Number of matched tiles (always even).
    pub fn matched_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.matched).count()
    }

    /// Sound ids in board order.
    pub fn deck(&self) -> [SoundId; TILE_COUNT] {
        self.tiles.map(|t| t.sound)
    }
}

/// Move a focus index one step on the grid.
///
/// Out-of-range steps are clamped to `[0, TILE_COUNT - 1]`: Left from the first
/// column of the second row lands on the last tile of the first row, and
/// Up/Left from 0 stay at 0.
pub fn step_focus(focus: usize, direction: Direction) -> usize {
    let max = (TILE_COUNT - 1) as isize;
    (focus as isize + direction.offset()).clamp(0, max) as usize
}
