//! Session driver: game state plus the media handles it talks to.
//!
//! Every transition and every tick ends by draining the game's cue outbox into
//! the tone renderer and the speech handle, in emission order. The handles are
//! borrowed for the life of the session (typically `&mut` to a [`Media`] owned
//! by the caller) and handed back by [`Session::into_parts`].
//!
//! [`Media`]: crate::audio::Media

use log::warn;

use crate::audio::{Speech, ToneRenderer};
use crate::core::{GameSnapshot, GameState};
use crate::transcript::{CueRecord, Transcript};
use crate::types::{Cue, GameAction};

pub struct Session<T: ToneRenderer, S: Speech> {
    game: GameState,
    tones: T,
    speech: S,
    transcript: Option<Transcript>,
}

impl<T: ToneRenderer, S: Speech> Session<T, S> {
    pub fn new(game: GameState, tones: T, speech: S) -> Self {
        Self {
            game,
            tones,
            speech,
            transcript: None,
        }
    }

    /// Also log every dispatched cue to `transcript`.
    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = Some(transcript);
        self
    }

    /// Apply a player action and dispatch the cues it produced.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let accepted = self.game.apply_action(action);
        self.dispatch();
        accepted
    }

    /// Advance the game clock and dispatch whatever fired.
    pub fn tick(&mut self, elapsed_ms: u32) -> usize {
        let fired = self.game.tick(elapsed_ms);
        self.dispatch();
        fired
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn tones(&self) -> &T {
        &self.tones
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    pub fn into_parts(self) -> (GameState, T, S) {
        (self.game, self.tones, self.speech)
    }

    fn dispatch(&mut self) {
        let t_ms = self.game.clock_ms();
        let generation = self.game.generation();

        for cue in self.game.drain_cues() {
            match cue {
                Cue::Tone(tone) => self.tones.play(tone),
                Cue::Speak(announcement) => self.speech.announce(&announcement.to_string()),
            }

            let failed = match self.transcript.as_mut() {
                Some(transcript) => transcript
                    .record(&CueRecord {
                        t_ms,
                        generation,
                        cue: cue.into(),
                    })
                    .err(),
                None => None,
            };
            if let Some(e) = failed {
                warn!("cue transcript disabled: {e}");
                self.transcript = None;
            }
        }
    }
}
