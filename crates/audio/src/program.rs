//! Tone programs: the synthesized shape of every tone cue, as plain data.
//!
//! A program is a handful of oscillator voices, each sweeping from a start to an
//! end frequency over its own window, mixed under one exponential decay
//! envelope. Programs can be sampled at any instant, which keeps them testable
//! without an audio device; the optional `rodio` backend streams them.

use std::f32::consts::TAU;

use crate::types::{SoundId, ToneCue};

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Sample the waveform at a phase fraction in `[0, 1)`.
    pub fn sample(self, phase: f32) -> f32 {
        let p = phase - phase.floor();
        match self {
            Waveform::Sine => (TAU * p).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * p - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
        }
    }
}

/// How a voice moves between its start and end frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Linear,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    pub sweep: Sweep,
    pub offset_ms: u32,
    pub duration_ms: u32,
}

impl Voice {
    fn new(waveform: Waveform, start_hz: f32, end_hz: f32, offset_ms: u32, duration_ms: u32) -> Self {
        Self {
            waveform,
            start_hz,
            end_hz,
            sweep: Sweep::Linear,
            offset_ms,
            duration_ms,
        }
    }

    fn exponential(mut self) -> Self {
        self.sweep = Sweep::Exponential;
        self
    }

    /// Oscillator phase (in cycles) `t` seconds into the voice.
    fn phase(&self, t: f32) -> f32 {
        let d = self.duration_ms as f32 / 1000.0;
        let (f0, f1) = (self.start_hz, self.end_hz);
        match self.sweep {
            Sweep::Exponential if f0 > 0.0 && f1 > 0.0 && f0 != f1 => {
                let k = (f1 / f0).ln() / d;
                f0 * ((k * t).exp() - 1.0) / k
            }
            _ => f0 * t + (f1 - f0) * t * t / (2.0 * d),
        }
    }

    fn sample(&self, t_ms: f32) -> Option<f32> {
        let local = t_ms - self.offset_ms as f32;
        if local < 0.0 || local >= self.duration_ms as f32 {
            return None;
        }
        Some(self.waveform.sample(self.phase(local / 1000.0)))
    }
}

/// A complete tone: voices plus envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneProgram {
    pub voices: Vec<Voice>,
    /// Initial amplitude; decays exponentially to 1% over the program.
    pub gain: f32,
    pub duration_ms: u32,
}

impl ToneProgram {
    /// Amplitude at `t_ms` (silence past the end).
    pub fn sample_at(&self, t_ms: f32) -> f32 {
        if t_ms < 0.0 || t_ms >= self.duration_ms as f32 {
            return 0.0;
        }
        let progress = t_ms / self.duration_ms as f32;
        let envelope = self.gain * (0.01 / self.gain).powf(progress);
        let (sum, active) = self
            .voices
            .iter()
            .filter_map(|v| v.sample(t_ms))
            .fold((0.0, 0u32), |(s, n), x| (s + x, n + 1));
        if active == 0 {
            return 0.0;
        }
        envelope * sum / active as f32
    }
}

/// Build the program for a tone cue.
pub fn program_for(cue: ToneCue) -> ToneProgram {
    use Waveform::*;

    match cue {
        ToneCue::TileSound(SoundId::Dog) => ToneProgram {
            // Bark: two detuned oscillators dropping in pitch.
            voices: vec![
                Voice::new(Sawtooth, 200.0, 150.0, 0, 100).exponential(),
                Voice::new(Square, 400.0, 300.0, 0, 100).exponential(),
                Voice::new(Sawtooth, 150.0, 150.0, 100, 100),
                Voice::new(Square, 300.0, 300.0, 100, 100),
            ],
            gain: 0.4,
            duration_ms: 200,
        },
        ToneCue::TileSound(SoundId::Cat) => ToneProgram {
            // Meow: rise then slow fall.
            voices: vec![
                Voice::new(Triangle, 300.0, 500.0, 0, 100),
                Voice::new(Triangle, 500.0, 400.0, 100, 200),
                Voice::new(Triangle, 400.0, 250.0, 300, 200),
                Voice::new(Triangle, 250.0, 250.0, 500, 100),
            ],
            gain: 0.4,
            duration_ms: 600,
        },
        ToneCue::TileSound(SoundId::Bird) => ToneProgram {
            // Chirp: fast warble.
            voices: vec![
                Voice::new(Sine, 800.0, 1200.0, 0, 50),
                Voice::new(Sine, 1200.0, 900.0, 50, 50),
                Voice::new(Sine, 900.0, 1100.0, 100, 50),
                Voice::new(Sine, 1100.0, 800.0, 150, 50),
                Voice::new(Sine, 800.0, 800.0, 200, 50),
            ],
            gain: 0.25,
            duration_ms: 250,
        },
        ToneCue::Feedback { correct: true } => ToneProgram {
            // C-E-G arpeggio.
            voices: vec![
                Voice::new(Sine, 523.0, 523.0, 0, 100),
                Voice::new(Sine, 659.0, 659.0, 100, 100),
                Voice::new(Sine, 784.0, 784.0, 200, 200),
            ],
            gain: 0.2,
            duration_ms: 400,
        },
        ToneCue::Feedback { correct: false } => ToneProgram {
            // Gentle falling step.
            voices: vec![
                Voice::new(Sine, 330.0, 330.0, 0, 200),
                Voice::new(Sine, 294.0, 294.0, 200, 200),
            ],
            gain: 0.2,
            duration_ms: 400,
        },
        ToneCue::Position { row, col } => {
            // Column picks the note (C, E, G), the top row sounds an octave up.
            let base = [262.0, 330.0, 392.0][(col as usize).min(2)];
            let hz = if row == 0 { base * 2.0 } else { base };
            ToneProgram {
                voices: vec![Voice::new(Sine, hz, hz, 0, 120)],
                gain: 0.15,
                duration_ms: 120,
            }
        }
    }
}
