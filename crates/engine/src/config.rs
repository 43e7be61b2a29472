//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sound_match_audio::MediaConfig;

/// Deck seed (`u32`); random when unset.
pub const ENV_SEED: &str = "SOUND_MATCH_SEED";
/// `1`/`true` disables tone output.
pub const ENV_MUTE: &str = "SOUND_MATCH_MUTE";
/// External speech command line, e.g. `espeak -s 150`.
pub const ENV_TTS_CMD: &str = "SOUND_MATCH_TTS_CMD";
/// File receiving the JSON-lines cue transcript.
pub const ENV_TRANSCRIPT_PATH: &str = "SOUND_MATCH_TRANSCRIPT_PATH";
/// File receiving log output.
pub const ENV_LOG_PATH: &str = "SOUND_MATCH_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{ENV_SEED} must be an unsigned 32-bit integer, got `{0}`")]
    InvalidSeed(String),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub media: MediaConfig,
    pub transcript_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            media: MediaConfig::default(),
            transcript_path: None,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let seed = match non_empty(lookup(ENV_SEED)) {
            Some(s) => s.parse().map_err(|_| ConfigError::InvalidSeed(s))?,
            None => clock_seed(),
        };

        let muted = lookup(ENV_MUTE)
            .map(|v| v.trim() == "1" || v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            seed,
            media: MediaConfig {
                muted,
                tts_command: non_empty(lookup(ENV_TTS_CMD)),
            },
            transcript_path: non_empty(lookup(ENV_TRANSCRIPT_PATH)).map(PathBuf::from),
            log_path: non_empty(lookup(ENV_LOG_PATH)).map(PathBuf::from),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
