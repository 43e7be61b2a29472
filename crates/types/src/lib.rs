//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by every crate in the workspace:
//! board geometry, the fixed timing of the turn sequence, player actions and the
//! audio/speech cues the game state emits. Everything here is plain data with no
//! external dependencies, so it can be used from core logic, rendering and the
//! media collaborators alike.
//!
//! # Board Geometry
//!
//! - **Columns**: 3
//! - **Rows**: 2
//! - **Tiles**: 6, indexed row-major (`index = row * 3 + col`)
//! - **Pairs**: 3, one per [`SoundId`]
//!
//! # Turn Timing
//!
//! All delays are in milliseconds of virtual game time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INTRO_ANNOUNCE_DELAY_MS` | 0 | Intro speech after a new game (fires on the next tick) |
//! | `POSITION_ANNOUNCE_DELAY_MS` | 800 | "Tile at row R, column C" after a selection |
//! | `RESOLVE_DELAY_MS` | 1000 | Match/no-match resolution after the second selection |
//! | `FEEDBACK_SPEECH_DELAY_MS` | 200 | Feedback tone leads the verdict speech by this much |
//! | `COMPLETION_ANNOUNCE_DELAY_MS` | 1000 | Final announcement after the third match |
//!
//! # Examples
//!
//! ```
//! use sound_match_types::{Direction, GameAction, SoundId, TILE_COUNT};
//!
//! assert_eq!(TILE_COUNT, 6);
//! assert_eq!(SoundId::from_id(2), Some(SoundId::Cat));
//! assert_eq!(SoundId::Bird.animal_plural(), "birds");
//!
//! let action = GameAction::MoveFocus(Direction::Right);
//! assert_eq!(action.to_string(), "moveRight");
//! ```

use std::fmt;

/// Number of tile columns on the board.
pub const GRID_COLS: usize = 3;

/// Number of tile rows on the board.
pub const GRID_ROWS: usize = 2;

/// Total tiles per game (3x2).
pub const TILE_COUNT: usize = GRID_COLS * GRID_ROWS;

/// Number of matching pairs per game.
pub const PAIR_COUNT: u8 = (TILE_COUNT / 2) as u8;

/// Points awarded for each matched pair.
pub const POINTS_PER_MATCH: u32 = 10;

/// Frame interval of the terminal driver (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Delay of the intro announcement after a new game.
pub const INTRO_ANNOUNCE_DELAY_MS: u32 = 0;

/// Delay between a tile selection and its position announcement.
pub const POSITION_ANNOUNCE_DELAY_MS: u32 = 800;

/// Delay between the second selection of a pair and its resolution.
pub const RESOLVE_DELAY_MS: u32 = 1000;

/// Gap between the feedback tone and the verdict announcement.
pub const FEEDBACK_SPEECH_DELAY_MS: u32 = 200;

/// Delay between the final match and the completion announcement.
pub const COMPLETION_ANNOUNCE_DELAY_MS: u32 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_timing_defaults() {
        assert_eq!(POSITION_ANNOUNCE_DELAY_MS, 800);
        assert!((1000..=1200).contains(&RESOLVE_DELAY_MS));
        assert!((100..=300).contains(&FEEDBACK_SPEECH_DELAY_MS));
        assert!((1000..=1500).contains(&COMPLETION_ANNOUNCE_DELAY_MS));
    }

    #[test]
    fn board_geometry() {
        assert_eq!(TILE_COUNT, 6);
        assert_eq!(PAIR_COUNT, 3);
        assert_eq!(tile_position(0), (0, 0));
        assert_eq!(tile_position(4), (1, 1));
        assert_eq!(tile_position(5), (1, 2));
    }

    #[test]
    fn announcement_texts() {
        assert_eq!(
            Announcement::TilePosition { row: 2, col: 3 }.to_string(),
            "Tile at row 2, column 3"
        );
        assert_eq!(
            Announcement::Focus {
                row: 1,
                col: 2,
                state: TileState::Matched,
            }
            .to_string(),
            "Tile at row 1, column 2. Matched"
        );
        assert_eq!(
            Announcement::Match(SoundId::Dog).to_string(),
            "Correct! You found the matching dogs!"
        );
        assert_eq!(
            Announcement::Complete { score: 30 }.to_string(),
            "Congratulations! You completed the game with a score of 30! Press R to play again."
        );
    }

    #[test]
    fn tile_state_prefers_matched() {
        assert_eq!(TileState::of(false, false), TileState::Available);
        assert_eq!(TileState::of(false, true), TileState::Selected);
        assert_eq!(TileState::of(true, true), TileState::Matched);
    }

    #[test]
    fn action_names_round_trip() {
        for action in [
            GameAction::MoveFocus(Direction::Up),
            GameAction::MoveFocus(Direction::Down),
            GameAction::MoveFocus(Direction::Left),
            GameAction::MoveFocus(Direction::Right),
            GameAction::SelectFocused,
            GameAction::Restart,
            GameAction::Help,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(GameAction::from_str("hold"), None);
    }
}

/// Row and column (both zero-based) of a tile index.
pub const fn tile_position(index: usize) -> (usize, usize) {
    (index / GRID_COLS, index % GRID_COLS)
}

/// The three animal sounds hidden under the tiles.
///
/// The numeric ids (1, 2, 3) are the stable identifiers used in decks,
/// snapshots and transcripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SoundId {
    /// Dog bark (id 1)
    Dog,
    /// Cat meow (id 2)
    Cat,
    /// Bird chirp (id 3)
    Bird,
}

impl SoundId {
    /// All sounds in id order.
    pub const ALL: [SoundId; 3] = [SoundId::Dog, SoundId::Cat, SoundId::Bird];

    /// Numeric id in `1..=3`.
    pub fn id(self) -> u8 {
        match self {
            SoundId::Dog => 1,
            SoundId::Cat => 2,
            SoundId::Bird => 3,
        }
    }

    /// Look up a sound by its numeric id.
    ///
    /// # Examples
    ///
    /// ```
    /// use sound_match_types::SoundId;
    ///
    /// assert_eq!(SoundId::from_id(1), Some(SoundId::Dog));
    /// assert_eq!(SoundId::from_id(4), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(SoundId::Dog),
            2 => Some(SoundId::Cat),
            3 => Some(SoundId::Bird),
            _ => None,
        }
    }

    /// Plural animal name used in match announcements.
    pub fn animal_plural(self) -> &'static str {
        match self {
            SoundId::Dog => "dogs",
            SoundId::Cat => "cats",
            SoundId::Bird => "birds",
        }
    }

    /// Lowercase animal name, used in transcripts and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            SoundId::Dog => "dog",
            SoundId::Cat => "cat",
            SoundId::Bird => "bird",
        }
    }
}

/// What a tile currently offers the player, as spoken and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileState {
    Available,
    Selected,
    Matched,
}

impl TileState {
    /// Matched wins over selected; a matched tile is never in the selection.
    pub fn of(matched: bool, selected: bool) -> Self {
        if matched {
            TileState::Matched
        } else if selected {
            TileState::Selected
        } else {
            TileState::Available
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TileState::Available => "Available",
            TileState::Selected => "Selected",
            TileState::Matched => "Matched",
        }
    }
}

/// Something on screen a pointer press can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// A tile, by board index
    Tile(usize),
    /// The "Play Again" button on the completion banner
    PlayAgain,
}

/// Focus movement direction on the 3x2 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Signed index offset of one step in this direction.
    pub fn offset(self) -> isize {
        match self {
            Direction::Up => -(GRID_COLS as isize),
            Direction::Down => GRID_COLS as isize,
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Player requests that can be applied to the game state
///
/// Keyboard and pointer input are both translated into these; the game state
/// decides whether each one is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move the keyboard focus one step (clamped, never wraps)
    MoveFocus(Direction),
    /// Select the tile under the keyboard focus
    SelectFocused,
    /// Select a tile directly by index (pointer activation)
    Select(usize),
    /// Throw away the current game and deal a new one
    Restart,
    /// Speak the instructions
    Help,
}

impl GameAction {
    /// Parse an action name (case-insensitive).
    ///
    /// `Select(index)` has no name form; it only comes from pointer input.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::MoveFocus(Direction::Up)),
            "movedown" => Some(GameAction::MoveFocus(Direction::Down)),
            "moveleft" => Some(GameAction::MoveFocus(Direction::Left)),
            "moveright" => Some(GameAction::MoveFocus(Direction::Right)),
            "select" => Some(GameAction::SelectFocused),
            "restart" => Some(GameAction::Restart),
            "help" => Some(GameAction::Help),
            _ => None,
        }
    }

    /// camelCase name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveFocus(Direction::Up) => "moveUp",
            GameAction::MoveFocus(Direction::Down) => "moveDown",
            GameAction::MoveFocus(Direction::Left) => "moveLeft",
            GameAction::MoveFocus(Direction::Right) => "moveRight",
            GameAction::SelectFocused => "select",
            GameAction::Select(_) => "selectTile",
            GameAction::Restart => "restart",
            GameAction::Help => "help",
        }
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameAction::Select(index) => write!(f, "selectTile({index})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// A spoken announcement.
///
/// `row` and `col` in [`Announcement::TilePosition`] and
/// [`Announcement::Focus`] are one-based, as spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Announcement {
    Intro,
    Help,
    TilePosition { row: u8, col: u8 },
    /// Label of the tile that just received keyboard focus.
    Focus { row: u8, col: u8, state: TileState },
    Match(SoundId),
    Mismatch,
    Complete { score: u32 },
}

impl Announcement {
    /// Short machine-readable kind, used in transcripts.
    pub fn kind(&self) -> &'static str {
        match self {
            Announcement::Intro => "intro",
            Announcement::Help => "help",
            Announcement::TilePosition { .. } => "tilePosition",
            Announcement::Focus { .. } => "focus",
            Announcement::Match(_) => "match",
            Announcement::Mismatch => "mismatch",
            Announcement::Complete { .. } => "complete",
        }
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Announcement::Intro => f.write_str(
                "Sound Match game started! Use arrow keys to navigate and Enter or Space to select tiles. Find matching pairs of sounds!",
            ),
            Announcement::Help => f.write_str(
                "Sound Match Game. Use arrow keys to navigate between tiles. Press Enter or Space to select a tile and hear its sound. Find matching pairs! Press R to restart.",
            ),
            Announcement::TilePosition { row, col } => {
                write!(f, "Tile at row {row}, column {col}")
            }
            Announcement::Focus { row, col, state } => {
                write!(f, "Tile at row {row}, column {col}. {}", state.as_str())
            }
            Announcement::Match(sound) => write!(
                f,
                "Correct! You found the matching {}!",
                sound.animal_plural()
            ),
            Announcement::Mismatch => f.write_str("Try again! Those sounds don't match."),
            Announcement::Complete { score } => write!(
                f,
                "Congratulations! You completed the game with a score of {score}! Press R to play again."
            ),
        }
    }
}

/// A short synthesized tone request.
///
/// `row` and `col` in [`ToneCue::Position`] are zero-based grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneCue {
    TileSound(SoundId),
    Feedback { correct: bool },
    Position { row: u8, col: u8 },
}

/// An audio or speech request emitted by the game state.
///
/// Cues are fire-and-forget: the game never waits on them and never learns
/// whether they were rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Tone(ToneCue),
    Speak(Announcement),
}
