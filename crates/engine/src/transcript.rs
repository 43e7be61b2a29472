//! JSON-lines transcript of dispatched cues.
//!
//! One record per line:
//!
//! ```text
//! {"t_ms":1000,"generation":1,"cue":{"type":"feedback","correct":true}}
//! {"t_ms":1200,"generation":1,"cue":{"type":"speak","kind":"match","text":"Correct! You found the matching dogs!"}}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Cue, ToneCue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CueBody {
    TileSound { sound: u8, animal: String },
    Feedback { correct: bool },
    PositionTone { row: u8, col: u8 },
    Speak { kind: String, text: String },
}

impl From<Cue> for CueBody {
    fn from(cue: Cue) -> Self {
        match cue {
            Cue::Tone(ToneCue::TileSound(sound)) => CueBody::TileSound {
                sound: sound.id(),
                animal: sound.as_str().to_string(),
            },
            Cue::Tone(ToneCue::Feedback { correct }) => CueBody::Feedback { correct },
            Cue::Tone(ToneCue::Position { row, col }) => CueBody::PositionTone { row, col },
            Cue::Speak(announcement) => CueBody::Speak {
                kind: announcement.kind().to_string(),
                text: announcement.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueRecord {
    /// Virtual game time at dispatch.
    pub t_ms: u64,
    pub generation: u32,
    pub cue: CueBody,
}

pub struct Transcript {
    out: Box<dyn Write>,
    buf: Vec<u8>,
}

impl Transcript {
    /// Append to the file at `path`, creating it if needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file: File = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }

    pub fn new(out: impl Write + 'static) -> Self {
        Self {
            out: Box::new(out),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn record(&mut self, record: &CueRecord) -> io::Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.out.flush()
    }
}
