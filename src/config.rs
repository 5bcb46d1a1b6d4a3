use crate::speech::SpeechSettings;
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Which speech engine the binary drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEngineKind {
    /// External synthesizer program
    Espeak,
    /// No audio; utterances are only logged
    Silent,
}

impl SpeechEngineKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "espeak" => Ok(SpeechEngineKind::Espeak),
            "silent" => Ok(SpeechEngineKind::Silent),
            other => bail!(
                "Invalid SAKHI_SPEECH_ENGINE '{}'. Expected 'espeak' or 'silent'",
                other
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Preferences
    pub preferences_path: PathBuf,

    // Speech
    pub speech_engine: SpeechEngineKind,
    pub speech_command: String,
    pub speech_rate: f32,
    pub speech_pitch: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = SpeechSettings::default();

        Ok(Self {
            // Preferences
            preferences_path: std::env::var("SAKHI_PREFERENCES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/preferences.json")),

            // Speech
            speech_engine: match std::env::var("SAKHI_SPEECH_ENGINE") {
                Ok(value) => SpeechEngineKind::parse(&value)?,
                Err(_) => SpeechEngineKind::Espeak,
            },
            speech_command: std::env::var("SAKHI_SPEECH_COMMAND")
                .unwrap_or_else(|_| "espeak-ng".to_string()),
            speech_rate: std::env::var("SAKHI_SPEECH_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate),
            speech_pitch: std::env::var("SAKHI_SPEECH_PITCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.pitch),
        })
    }

    pub fn speech_settings(&self) -> SpeechSettings {
        SpeechSettings {
            rate: self.speech_rate,
            pitch: self.speech_pitch,
        }
    }
}
