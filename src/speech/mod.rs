//! Text-to-speech playback.
//!
//! - `engine`: boundary trait for the host synthesizer, utterances and events
//! - `adapter`: preemption, voice selection and English fallback
//! - `metrics`: playback counters
//! - `command`: engine driving an external synthesizer program
//! - `recording`: engine that records utterances without audio

mod adapter;
mod command;
pub mod engine;
mod metrics;
mod recording;

pub use adapter::{FallbackPolicy, SpeechAdapter, SpeechSettings, FALLBACK_LOCALE};
pub use command::CommandEngine;
pub use engine::{
    SpeakingFlag, SpeechEngine, SpeechErrorKind, SpeechEvent, SpeechEventKind, Utterance,
    UtteranceId, Voice,
};
pub use metrics::{MetricsReport, SpeechMetrics};
pub use recording::RecordingEngine;
