//! Session engine: configuration, cue dispatch and the cue transcript.
//!
//! [`Session`] is the glue between the pure game state in `core` and the
//! media collaborators in `audio`. The terminal front end drives it with
//! player actions and frame ticks; tests drive it with recording
//! collaborators and exact virtual time.

pub mod config;
pub mod session;
pub mod transcript;

pub use sound_match_audio as audio;
pub use sound_match_core as core;
pub use sound_match_types as types;

pub use config::{ConfigError, GameConfig};
pub use session::Session;
pub use transcript::{CueBody, CueRecord, Transcript};
