//! Speech engine boundary.
//!
//! The playback adapter talks to the host synthesizer only through
//! [`SpeechEngine`]. Engines report progress asynchronously by sending
//! [`SpeechEvent`]s on the channel handed to them with each utterance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// A synthesis voice offered by an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Identifier the engine uses to select the voice
    pub id: String,
    /// Human-readable voice name
    pub name: String,
    /// Locale tag of the voice (e.g. "hi", "ta-IN", "en_US")
    pub lang: String,
}

impl Voice {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lang: lang.into(),
        }
    }

    /// Whether this voice speaks the primary language of `locale`.
    ///
    /// Only the primary subtag is compared, case-insensitively, so `ta-IN`
    /// matches voices tagged `ta`, `ta_IN` or `TA-lk`.
    pub fn matches_locale(&self, locale: &str) -> bool {
        let wanted = primary_subtag(locale);
        !wanted.is_empty() && primary_subtag(&self.lang).eq_ignore_ascii_case(wanted)
    }
}

/// Primary language subtag of a locale tag ("ta-IN" -> "ta").
pub fn primary_subtag(locale: &str) -> &str {
    locale
        .split(|c| c == '-' || c == '_')
        .next()
        .unwrap_or("")
        .trim()
}

/// Identifier of one utterance, unique per adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceId(pub u64);

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One request to vocalize a string.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    /// Locale tag requested from the engine (e.g. "hi-IN")
    pub locale: String,
    /// Specific voice, or `None` for the engine default for `locale`
    pub voice: Option<Voice>,
    /// Speaking rate, 1.0 is the engine's normal rate
    pub rate: f32,
    /// Pitch, 1.0 is the engine's normal pitch
    pub pitch: f32,
}

/// Why an utterance could not be played.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechErrorKind {
    #[error("language unavailable")]
    LanguageUnavailable,

    #[error("voice unavailable")]
    VoiceUnavailable,

    #[error("interrupted")]
    Interrupted,

    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),
}

impl SpeechErrorKind {
    /// Errors that mean the requested language or voice cannot be produced.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            SpeechErrorKind::LanguageUnavailable | SpeechErrorKind::VoiceUnavailable
        )
    }
}

/// Lifecycle stage reported by an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEventKind {
    Started,
    Ended,
    Failed(SpeechErrorKind),
}

/// Lifecycle event for one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechEvent {
    pub utterance: UtteranceId,
    pub kind: SpeechEventKind,
}

impl SpeechEvent {
    pub fn started(utterance: UtteranceId) -> Self {
        Self {
            utterance,
            kind: SpeechEventKind::Started,
        }
    }

    pub fn ended(utterance: UtteranceId) -> Self {
        Self {
            utterance,
            kind: SpeechEventKind::Ended,
        }
    }

    pub fn failed(utterance: UtteranceId, error: SpeechErrorKind) -> Self {
        Self {
            utterance,
            kind: SpeechEventKind::Failed(error),
        }
    }
}

/// Sending half of the lifecycle event channel.
pub type EventSender = UnboundedSender<SpeechEvent>;

/// Host speech synthesizer.
pub trait SpeechEngine {
    /// Voices currently installed. May be empty.
    fn list_voices(&self) -> Vec<Voice>;

    /// Stop everything in progress. Cancelled utterances need not report
    /// further events.
    fn cancel(&mut self);

    /// Start speaking. Returns immediately; progress is reported on `events`.
    fn speak(&mut self, utterance: Utterance, events: EventSender);
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for Box<E> {
    fn list_voices(&self) -> Vec<Voice> {
        (**self).list_voices()
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }

    fn speak(&mut self, utterance: Utterance, events: EventSender) {
        (**self).speak(utterance, events)
    }
}

/// Shared "is speaking" flag.
///
/// Only the playback adapter writes it; any number of clones may read it.
#[derive(Debug, Clone, Default)]
pub struct SpeakingFlag(Arc<AtomicBool>);

impl SpeakingFlag {
    pub fn is_speaking(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn set(&self, speaking: bool) {
        self.0.store(speaking, Ordering::Relaxed);
    }
}
