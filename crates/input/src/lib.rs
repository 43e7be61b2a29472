//! Terminal input module (engine-facing).
//!
//! Pure dispatch from `crossterm` key and mouse events to
//! [`crate::types::GameAction`]. No game rules live here: whether an action
//! has any effect is decided by the game state.

pub mod map;

pub use sound_match_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
