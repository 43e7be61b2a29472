//! Sound Match (workspace facade crate).
//!
//! An audio-first memory game for the terminal: six tiles on a 3x2 grid hide
//! three pairs of animal sounds. This package exposes the member crates under
//! one path, `sound_match::{audio,core,engine,input,term,types}`, and ships the
//! terminal binary.

pub use sound_match_audio as audio;
pub use sound_match_core as core;
pub use sound_match_engine as engine;
pub use sound_match_input as input;
pub use sound_match_term as term;
pub use sound_match_types as types;
