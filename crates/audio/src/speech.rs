//! Speech seam and the terminal narrator.
//!
//! Announcements follow a replace-on-issue policy: a new announcement
//! interrupts whatever is being spoken. Queued future announcements are the
//! game state's business and are never touched here.

use std::process::{Child, Command, Stdio};

use log::{debug, warn};

use crate::MediaError;

/// Speaks announcements.
pub trait Speech {
    /// Interrupt any utterance in progress and start speaking `text`.
    fn announce(&mut self, text: &str);

    /// Stop speaking.
    fn cancel(&mut self);
}

impl<T: Speech + ?Sized> Speech for &mut T {
    fn announce(&mut self, text: &str) {
        (**self).announce(text)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

impl<T: Speech + ?Sized> Speech for Box<T> {
    fn announce(&mut self, text: &str) {
        (**self).announce(text)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

/// An external text-to-speech program, e.g. `espeak -s 150`.
///
/// The announcement text is passed as the last argument. Starting a new
/// utterance kills the previous process if it is still running.
#[derive(Debug)]
pub struct VoiceCommand {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl VoiceCommand {
    /// Split a command line on whitespace.
    pub fn parse(command_line: &str) -> Result<Self, MediaError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(MediaError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
            child: None,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn speak(&mut self, text: &str) -> Result<(), MediaError> {
        self.stop();
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| MediaError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        self.child = Some(child);
        Ok(())
    }

    /// Kill the running utterance, if any.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl Drop for VoiceCommand {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Terminal narrator: keeps the current announcement as an on-screen caption
/// and optionally voices it through an external command.
#[derive(Debug, Default)]
pub struct Narrator {
    caption: Option<String>,
    voice: Option<VoiceCommand>,
    announced: u64,
}

impl Narrator {
    /// Caption-only narrator.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voice(voice: VoiceCommand) -> Self {
        Self {
            voice: Some(voice),
            ..Self::default()
        }
    }

    /// Text of the announcement currently on screen.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn has_voice(&self) -> bool {
        self.voice.is_some()
    }

    /// Announcements issued so far.
    pub fn announced(&self) -> u64 {
        self.announced
    }
}

impl Speech for Narrator {
    fn announce(&mut self, text: &str) {
        self.announced += 1;
        self.caption = Some(text.to_string());
        debug!("announce: {}", text);

        if let Some(voice) = self.voice.as_mut() {
            if let Err(e) = voice.speak(text) {
                warn!("{e}; continuing with captions only");
                self.voice = None;
            }
        }
    }

    fn cancel(&mut self) {
        self.caption = None;
        if let Some(voice) = self.voice.as_mut() {
            voice.stop();
        }
    }
}

/// Keeps every announcement, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeech {
    pub spoken: Vec<String>,
    pub cancels: usize,
}

impl Speech for RecordingSpeech {
    fn announce(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}
