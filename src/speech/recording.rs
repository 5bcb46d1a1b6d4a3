//! Speech engine that records utterances instead of producing audio.
//!
//! Used when audio output is switched off and as the scripted engine in tests.
//! Clones share state, so a handle kept outside the adapter can inspect what
//! was spoken and drive the end of playback.

use crate::speech::engine::{
    primary_subtag, EventSender, SpeechEngine, SpeechErrorKind, SpeechEvent, Utterance,
    UtteranceId, Voice,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct RecordingState {
    voices: Vec<Voice>,
    /// Primary subtags the engine reports as unavailable
    unavailable: Vec<String>,
    spoken: Vec<Utterance>,
    playing: Option<(UtteranceId, EventSender)>,
    cancellations: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingEngine {
    /// Engine with no voices installed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voices(voices: Vec<Voice>) -> Self {
        let engine = Self::new();
        engine.state().voices = voices;
        engine
    }

    /// Make every utterance for `locale`'s language fail with
    /// [`SpeechErrorKind::LanguageUnavailable`].
    pub fn with_unavailable_locale(self, locale: &str) -> Self {
        self.state()
            .unavailable
            .push(primary_subtag(locale).to_ascii_lowercase());
        self
    }

    /// Every utterance handed to the engine, in order.
    pub fn spoken(&self) -> Vec<Utterance> {
        self.state().spoken.clone()
    }

    /// The utterance currently playing, if any.
    pub fn audible(&self) -> Option<Utterance> {
        let state = self.state();
        let (id, _) = state.playing.as_ref()?;
        state.spoken.iter().find(|u| u.id == *id).cloned()
    }

    /// Number of `cancel` calls received.
    pub fn cancellations(&self) -> usize {
        self.state().cancellations
    }

    /// Finish the playing utterance. Returns false if nothing was playing.
    pub fn finish(&self) -> bool {
        match self.state().playing.take() {
            Some((id, events)) => events.send(SpeechEvent::ended(id)).is_ok(),
            None => false,
        }
    }

    /// Abort the playing utterance with `error`. Returns false if nothing was
    /// playing.
    pub fn fail(&self, error: SpeechErrorKind) -> bool {
        match self.state().playing.take() {
            Some((id, events)) => events.send(SpeechEvent::failed(id, error)).is_ok(),
            None => false,
        }
    }

    fn state(&self) -> MutexGuard<'_, RecordingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SpeechEngine for RecordingEngine {
    fn list_voices(&self) -> Vec<Voice> {
        self.state().voices.clone()
    }

    fn cancel(&mut self) {
        let mut state = self.state();
        state.playing = None;
        state.cancellations += 1;
    }

    fn speak(&mut self, utterance: Utterance, events: EventSender) {
        let mut state = self.state();
        let id = utterance.id;
        let lang = primary_subtag(&utterance.locale).to_ascii_lowercase();
        state.spoken.push(utterance);

        if state.unavailable.contains(&lang) {
            state.playing = None;
            let _ = events.send(SpeechEvent::failed(id, SpeechErrorKind::LanguageUnavailable));
            return;
        }

        let _ = events.send(SpeechEvent::started(id));
        state.playing = Some((id, events));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::engine::SpeechEventKind;
    use tokio::sync::mpsc;

    fn utterance(id: u64, text: &str, locale: &str) -> Utterance {
        Utterance {
            id: UtteranceId(id),
            text: text.to_string(),
            locale: locale.to_string(),
            voice: None,
            rate: 1.0,
            pitch: 1.0,
        }
    }

    #[test]
    fn test_speak_records_and_starts() {
        let mut engine = RecordingEngine::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        engine.speak(utterance(1, "hello", "en-US"), tx);

        assert_eq!(engine.spoken().len(), 1);
        assert_eq!(engine.audible().map(|u| u.text), Some("hello".to_string()));
        assert_eq!(rx.try_recv().unwrap(), SpeechEvent::started(UtteranceId(1)));
    }

    #[test]
    fn test_cancel_silences() {
        let mut engine = RecordingEngine::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        engine.speak(utterance(1, "hello", "en-US"), tx);
        engine.cancel();

        assert!(engine.audible().is_none());
        assert_eq!(engine.cancellations(), 1);
        assert!(!engine.finish());
    }

    #[test]
    fn test_unavailable_locale_fails() {
        let mut engine = RecordingEngine::new().with_unavailable_locale("ta-IN");
        let (tx, mut rx) = mpsc::unbounded_channel();

        engine.speak(utterance(7, "வணக்கம்", "ta_LK"), tx);

        let event = rx.try_recv().unwrap();
        assert_eq!(
            event.kind,
            SpeechEventKind::Failed(SpeechErrorKind::LanguageUnavailable)
        );
        assert!(engine.audible().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let engine = RecordingEngine::with_voices(vec![Voice::new("hi", "Hindi", "hi")]);
        let mut clone = engine.clone();
        let (tx, mut rx) = mpsc::unbounded_channel();

        clone.speak(utterance(3, "नमस्ते", "hi-IN"), tx);
        assert_eq!(engine.list_voices().len(), 1);
        assert!(engine.finish());

        rx.try_recv().unwrap();
        assert_eq!(rx.try_recv().unwrap(), SpeechEvent::ended(UtteranceId(3)));
    }
}
