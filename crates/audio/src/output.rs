//! Speaker output through `rodio` (feature `audio`).

use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::program::{program_for, ToneProgram};
use crate::tones::ToneRenderer;
use crate::types::{SoundId, ToneCue};
use crate::MediaError;

const SAMPLE_RATE: u32 = 44_100;

/// Mono sample stream of one tone program.
#[derive(Debug, Clone)]
pub struct ProgramSource {
    program: ToneProgram,
    frame: u64,
    total_frames: u64,
}

impl ProgramSource {
    pub fn new(program: ToneProgram) -> Self {
        let total_frames = SAMPLE_RATE as u64 * program.duration_ms as u64 / 1_000;
        Self {
            program,
            frame: 0,
            total_frames,
        }
    }
}

impl Iterator for ProgramSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.total_frames {
            return None;
        }
        let t_ms = self.frame as f32 * 1000.0 / SAMPLE_RATE as f32;
        self.frame += 1;
        Some(self.program.sample_at(t_ms))
    }
}

impl Source for ProgramSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_frames.saturating_sub(self.frame) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_millis(self.program.duration_ms as u64))
    }
}

/// Tones played on the default output device.
pub struct RodioTones {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioTones {
    pub fn open() -> Result<Self, MediaError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| MediaError::Output(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    fn render(&mut self, cue: ToneCue) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.append(ProgramSource::new(program_for(cue)));
        sink.detach();
    }
}

impl ToneRenderer for RodioTones {
    fn tile_sound(&mut self, sound: SoundId) {
        self.render(ToneCue::TileSound(sound));
    }

    fn feedback(&mut self, correct: bool) {
        self.render(ToneCue::Feedback { correct });
    }

    fn position_tone(&mut self, row: u8, col: u8) {
        self.render(ToneCue::Position { row, col });
    }
}
