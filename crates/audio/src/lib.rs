//! Media collaborators - tones and speech
//!
//! The game state only ever emits cues; this crate turns them into sound and
//! words. Both collaborators are acquired once when the game view is mounted
//! ([`Media::acquire`]) and released when it goes away ([`Media::release`]).
//! Neither can fail the game: a missing audio device or speech program
//! degrades to silence (tones) or captions only (speech).
//!
//! # Collaborators
//!
//! - [`ToneRenderer`]: tile sounds, match feedback and focus position tones.
//!   [`program`] describes every tone as plain oscillator data; the `audio`
//!   cargo feature plays those programs through `rodio`.
//! - [`Speech`]: replace-on-issue announcements. [`Narrator`] keeps the current
//!   announcement as an on-screen caption and can voice it through an external
//!   command such as `espeak`.

pub mod program;
pub mod speech;
pub mod tones;

#[cfg(feature = "audio")]
pub mod output;

use log::{info, warn};

pub use sound_match_types as types;

pub use program::{program_for, ToneProgram};
pub use speech::{Narrator, RecordingSpeech, Speech, VoiceCommand};
pub use tones::{RecordingTones, SilentTones, ToneRenderer};

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("speech command is empty")]
    EmptyCommand,
    #[error("failed to start speech command `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no audio output available: {0}")]
    Output(String),
}

/// What to acquire at mount time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaConfig {
    /// Skip tone output entirely.
    pub muted: bool,
    /// External speech command line; captions only when `None`.
    pub tts_command: Option<String>,
}

/// The tone and speech handles for one mounted game view.
pub struct Media {
    pub tones: Box<dyn ToneRenderer>,
    pub speech: Narrator,
}

impl Media {
    /// Open the configured collaborators, falling back to silent ones.
    pub fn acquire(config: &MediaConfig) -> Self {
        let tones = open_tones(config.muted);

        let speech = match config.tts_command.as_deref() {
            Some(cmd) => match VoiceCommand::parse(cmd) {
                Ok(voice) => {
                    info!("speech through `{}`", voice.program());
                    Narrator::with_voice(voice)
                }
                Err(e) => {
                    warn!("{e}; captions only");
                    Narrator::new()
                }
            },
            None => Narrator::new(),
        };

        Self { tones, speech }
    }

    /// Stop any utterance in progress and drop the handles.
    pub fn release(mut self) {
        self.speech.cancel();
    }
}

fn open_tones(muted: bool) -> Box<dyn ToneRenderer> {
    if muted {
        info!("tones muted");
        return Box::new(SilentTones);
    }

    #[cfg(feature = "audio")]
    {
        match output::RodioTones::open() {
            Ok(tones) => return Box::new(tones),
            Err(e) => warn!("{e}; tones disabled"),
        }
    }

    #[cfg(not(feature = "audio"))]
    info!("built without the `audio` feature; tones disabled");

    Box::new(SilentTones)
}
