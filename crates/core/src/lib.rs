//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules and state of the sound matching game. It has
//! **no dependencies** on terminals, audio devices or wall-clock time:
//!
//! - **Deterministic**: the same seed deals the same decks, restarts included
//! - **Testable**: delayed effects run on a virtual clock, so tests never sleep
//! - **Portable**: audio and speech are emitted as [`Cue`](types::Cue) values
//!   for whatever renderer the host provides
//!
//! # Module Structure
//!
//! - [`board`]: the six tiles and clamped focus movement
//! - [`game_state`]: selection cycle, scoring, completion and restarts
//! - [`rng`]: seeded LCG and deck dealing
//! - [`schedule`]: ordered queue of timed effects
//! - [`snapshot`]: copyable state view for rendering
//!
//! # Game Rules
//!
//! - Six tiles hide three sounds, two tiles each
//! - Selecting a tile reveals it and plays its sound
//! - After a second selection the pair is resolved 1000ms later: matching
//!   tiles stay matched and score 10 points, others are hidden again
//! - While a pair is resolving no further tile can be selected
//! - The game is complete after three matches; only restart and help remain
//!
//! # Example
//!
//! ```
//! use sound_match_core::GameState;
//! use sound_match_core::rng::SORTED_DECK;
//! use sound_match_types::{GameAction, RESOLVE_DELAY_MS};
//!
//! // Board order: dog, dog, cat, cat, bird, bird
//! let mut game = GameState::with_deck(1, SORTED_DECK);
//!
//! game.apply_action(GameAction::Select(0));
//! game.apply_action(GameAction::Select(1));
//! game.tick(RESOLVE_DELAY_MS);
//!
//! assert_eq!(game.matches(), 1);
//! assert_eq!(game.score(), 10);
//! assert!(game.selected().is_empty());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with the elapsed
//! milliseconds; due effects fire in order and their cues are collected for
//! [`GameState::drain_cues`](game_state::GameState::drain_cues).

pub mod board;
pub mod game_state;
pub mod rng;
pub mod schedule;
pub mod snapshot;

pub use sound_match_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Tile};
pub use game_state::{GameState, TurnPhase};
pub use rng::{deal_deck, SimpleRng};
pub use schedule::{Effect, Scheduler};
pub use snapshot::{GameSnapshot, TileSnapshot};
