//! Tone renderer seam.

use crate::types::{SoundId, ToneCue};

/// Plays short synthesized tones.
///
/// Rendering is fire-and-forget: implementations return immediately and fail
/// silently when no output device is available.
pub trait ToneRenderer {
    fn tile_sound(&mut self, sound: SoundId);

    fn feedback(&mut self, correct: bool);

    /// `row` and `col` are zero-based grid coordinates.
    fn position_tone(&mut self, row: u8, col: u8);

    fn play(&mut self, cue: ToneCue) {
        match cue {
            ToneCue::TileSound(sound) => self.tile_sound(sound),
            ToneCue::Feedback { correct } => self.feedback(correct),
            ToneCue::Position { row, col } => self.position_tone(row, col),
        }
    }
}

impl<T: ToneRenderer + ?Sized> ToneRenderer for &mut T {
    fn tile_sound(&mut self, sound: SoundId) {
        (**self).tile_sound(sound)
    }

    fn feedback(&mut self, correct: bool) {
        (**self).feedback(correct)
    }

    fn position_tone(&mut self, row: u8, col: u8) {
        (**self).position_tone(row, col)
    }
}

impl<T: ToneRenderer + ?Sized> ToneRenderer for Box<T> {
    fn tile_sound(&mut self, sound: SoundId) {
        (**self).tile_sound(sound)
    }

    fn feedback(&mut self, correct: bool) {
        (**self).feedback(correct)
    }

    fn position_tone(&mut self, row: u8, col: u8) {
        (**self).position_tone(row, col)
    }
}

/// Renderer used when muted or when no device could be opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentTones;

impl ToneRenderer for SilentTones {
    fn tile_sound(&mut self, _sound: SoundId) {}

    fn feedback(&mut self, _correct: bool) {}

    fn position_tone(&mut self, _row: u8, _col: u8) {}
}

/// Keeps every requested tone, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingTones {
    pub played: Vec<ToneCue>,
}

impl ToneRenderer for RecordingTones {
    fn tile_sound(&mut self, sound: SoundId) {
        self.played.push(ToneCue::TileSound(sound));
    }

    fn feedback(&mut self, correct: bool) {
        self.played.push(ToneCue::Feedback { correct });
    }

    fn position_tone(&mut self, row: u8, col: u8) {
        self.played.push(ToneCue::Position { row, col });
    }
}
