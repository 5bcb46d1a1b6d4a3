//! Speech playback adapter.
//!
//! Turns "say this text in this language" into engine utterances:
//!
//! - at most one utterance is active; a new request cancels the previous one
//! - a voice is picked by primary-subtag match against the language's locale
//! - languages with a `fallback_announcement` that have no installed voice are
//!   announced by name in English instead of being read in a mismatched voice
//! - a "language/voice unavailable" failure is retried once in English
//!
//! Engine failures never reach the caller. Progress is observable only through
//! the shared [`SpeakingFlag`].

use crate::i18n::{LanguageCode, LanguageRegistry};
use crate::speech::engine::{
    EventSender, SpeakingFlag, SpeechEngine, SpeechEvent, SpeechEventKind, Utterance, UtteranceId,
    Voice,
};
use crate::speech::metrics::SpeechMetrics;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

/// Locale used for every English fallback utterance.
pub const FALLBACK_LOCALE: &str = "en-US";

/// Voice parameters applied to every utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        // Slightly slower than normal for clarity
        Self {
            rate: 0.9,
            pitch: 1.0,
        }
    }
}

/// What to say in English when the engine reports the language unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Re-speak the original text with the English voice
    RepeatInEnglish,
    /// Announce the language's English name (e.g. "Tamil")
    AnnounceLanguageName,
}

#[derive(Debug)]
struct ActiveUtterance {
    id: UtteranceId,
    language: LanguageCode,
    /// Text the caller asked for, before any substitution
    requested_text: String,
    policy: FallbackPolicy,
    /// Already a fallback; failures are terminal
    is_fallback: bool,
}

pub struct SpeechAdapter<E> {
    engine: E,
    settings: SpeechSettings,
    events_tx: EventSender,
    events_rx: UnboundedReceiver<SpeechEvent>,
    next_id: u64,
    active: Option<ActiveUtterance>,
    speaking: SpeakingFlag,
    metrics: SpeechMetrics,
}

impl<E: SpeechEngine> SpeechAdapter<E> {
    pub fn new(engine: E, settings: SpeechSettings) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            engine,
            settings,
            events_tx,
            events_rx,
            next_id: 1,
            active: None,
            speaking: SpeakingFlag::default(),
            metrics: SpeechMetrics::new(),
        }
    }

    /// Read handle for the "is speaking" flag.
    pub fn speaking_flag(&self) -> SpeakingFlag {
        self.speaking.clone()
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.is_speaking()
    }

    pub fn metrics(&self) -> &SpeechMetrics {
        &self.metrics
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Id of the utterance whose events are currently being tracked.
    pub fn active_utterance(&self) -> Option<UtteranceId> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Speak `text` in `language`, preempting anything in progress.
    pub fn speak(
        &mut self,
        text: &str,
        language: LanguageCode,
        policy: FallbackPolicy,
    ) -> UtteranceId {
        self.metrics.record_request();

        self.engine.cancel();
        if let Some(previous) = self.active.take() {
            debug!("Utterance {} preempted", previous.id);
            self.metrics.record_preemption();
        }
        self.speaking.set(false);

        let option = LanguageRegistry::get().option(language);
        let voice = self.voice_for(option.speech_locale);

        let id = self.allocate_id();
        match (voice, option.fallback_announcement) {
            (None, Some(announcement)) => {
                info!(
                    "No {} voice installed, announcing \"{}\" in English",
                    option.name, announcement
                );
                self.metrics.record_fallback();
                let english = self.voice_for(FALLBACK_LOCALE);
                self.start(
                    ActiveUtterance {
                        id,
                        language,
                        requested_text: text.to_string(),
                        policy,
                        is_fallback: true,
                    },
                    announcement.to_string(),
                    FALLBACK_LOCALE,
                    english,
                )
            }
            (voice, _) => {
                if voice.is_none() {
                    debug!(
                        "No voice matches {}, using engine default",
                        option.speech_locale
                    );
                }
                self.start(
                    ActiveUtterance {
                        id,
                        language,
                        requested_text: text.to_string(),
                        policy,
                        is_fallback: false,
                    },
                    text.to_string(),
                    option.speech_locale,
                    voice,
                )
            }
        }
    }

    /// Apply one lifecycle event. Events for anything but the active
    /// utterance are ignored.
    pub fn handle_event(&mut self, event: SpeechEvent) {
        let is_current = self.active_utterance() == Some(event.utterance);
        if !is_current {
            debug!("Ignoring stale {:?} for utterance {}", event.kind, event.utterance);
            return;
        }

        match event.kind {
            SpeechEventKind::Started => self.speaking.set(true),
            SpeechEventKind::Ended => {
                self.speaking.set(false);
                self.active = None;
            }
            SpeechEventKind::Failed(error) => {
                self.speaking.set(false);
                let Some(failed) = self.active.take() else {
                    return;
                };

                if !error.is_unavailable() || failed.is_fallback {
                    warn!("Speech synthesis error on utterance {}: {}", failed.id, error);
                    self.metrics.record_failure();
                    return;
                }

                let option = LanguageRegistry::get().option(failed.language);
                warn!(
                    "{} voice not available ({}), using English fallback",
                    option.name, error
                );
                let text = match failed.policy {
                    FallbackPolicy::RepeatInEnglish => failed.requested_text.clone(),
                    FallbackPolicy::AnnounceLanguageName => option.name.to_string(),
                };
                self.metrics.record_fallback();
                let id = self.allocate_id();
                let english = self.voice_for(FALLBACK_LOCALE);
                self.start(
                    ActiveUtterance {
                        id,
                        is_fallback: true,
                        ..failed
                    },
                    text,
                    FALLBACK_LOCALE,
                    english,
                );
            }
        }
    }

    /// Apply every event that has already arrived. Returns how many were read.
    pub fn pump_events(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            count += 1;
        }
        count
    }

    /// Wait for the next lifecycle event without applying it.
    pub async fn next_event(&mut self) -> Option<SpeechEvent> {
        self.events_rx.recv().await
    }

    /// First installed voice for `locale`, if any.
    fn voice_for(&self, locale: &str) -> Option<Voice> {
        self.engine
            .list_voices()
            .into_iter()
            .find(|voice| voice.matches_locale(locale))
    }

    fn allocate_id(&mut self) -> UtteranceId {
        let id = UtteranceId(self.next_id);
        self.next_id += 1;
        id
    }

    fn start(
        &mut self,
        active: ActiveUtterance,
        text: String,
        locale: &str,
        voice: Option<Voice>,
    ) -> UtteranceId {
        let id = active.id;
        let utterance = Utterance {
            id,
            text,
            locale: locale.to_string(),
            voice,
            rate: self.settings.rate,
            pitch: self.settings.pitch,
        };
        debug!(
            "Speaking utterance {} ({}): {:?}",
            id, utterance.locale, utterance.text
        );
        self.active = Some(active);
        self.engine.speak(utterance, self.events_tx.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::engine::SpeechErrorKind;
    use crate::speech::recording::RecordingEngine;

    fn all_voices() -> Vec<Voice> {
        vec![
            Voice::new("hi", "Hindi", "hi-IN"),
            Voice::new("en-us", "English (America)", "en-US"),
            Voice::new("ta", "Tamil", "ta-IN"),
        ]
    }

    fn adapter(engine: &RecordingEngine) -> SpeechAdapter<RecordingEngine> {
        SpeechAdapter::new(engine.clone(), SpeechSettings::default())
    }

    // ==================== Voice Selection Tests ====================

    #[test]
    fn test_speak_selects_matching_voice() {
        let engine = RecordingEngine::with_voices(all_voices());
        let mut speech = adapter(&engine);

        speech.speak("नमस्ते", LanguageCode::Hindi, FallbackPolicy::RepeatInEnglish);

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "नमस्ते");
        assert_eq!(spoken[0].locale, "hi-IN");
        assert_eq!(spoken[0].voice.as_ref().map(|v| v.id.as_str()), Some("hi"));
        assert_eq!(spoken[0].rate, 0.9);
        assert_eq!(spoken[0].pitch, 1.0);
    }

    #[test]
    fn test_speak_without_voices_uses_engine_default() {
        let engine = RecordingEngine::new();
        let mut speech = adapter(&engine);

        speech.speak("नमस्ते", LanguageCode::Hindi, FallbackPolicy::RepeatInEnglish);

        let spoken = engine.spoken();
        assert_eq!(spoken[0].text, "नमस्ते");
        assert_eq!(spoken[0].locale, "hi-IN");
        assert!(spoken[0].voice.is_none());
    }

    // ==================== Tamil Announcement Tests ====================

    #[test]
    fn test_tamil_without_voice_announces_name_in_english() {
        let engine = RecordingEngine::with_voices(vec![Voice::new("en-us", "English", "en-US")]);
        let mut speech = adapter(&engine);

        speech.speak("வரவேற்கிறோம்", LanguageCode::Tamil, FallbackPolicy::RepeatInEnglish);

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "Tamil");
        assert_eq!(spoken[0].locale, "en-US");
        assert_eq!(spoken[0].voice.as_ref().map(|v| v.id.as_str()), Some("en-us"));
        assert_eq!(speech.metrics().fallbacks(), 1);
    }

    #[test]
    fn test_tamil_with_voice_speaks_text() {
        let engine = RecordingEngine::with_voices(all_voices());
        let mut speech = adapter(&engine);

        speech.speak("வரவேற்கிறோம்", LanguageCode::Tamil, FallbackPolicy::RepeatInEnglish);

        let spoken = engine.spoken();
        assert_eq!(spoken[0].text, "வரவேற்கிறோம்");
        assert_eq!(spoken[0].locale, "ta-IN");
        assert_eq!(speech.metrics().fallbacks(), 0);
    }

    // ==================== Lifecycle Tests ====================

    #[test]
    fn test_lifecycle_sets_and_clears_flag() {
        let engine = RecordingEngine::with_voices(all_voices());
        let mut speech = adapter(&engine);
        let flag = speech.speaking_flag();

        speech.speak("Welcome", LanguageCode::English, FallbackPolicy::RepeatInEnglish);
        assert!(!flag.is_speaking());

        speech.pump_events();
        assert!(flag.is_speaking());

        assert!(engine.finish());
        speech.pump_events();
        assert!(!flag.is_speaking());
        assert_eq!(speech.active_utterance(), None);
    }

    #[test]
    fn test_other_error_is_not_retried() {
        let engine = RecordingEngine::with_voices(all_voices());
        let mut speech = adapter(&engine);

        speech.speak("Welcome", LanguageCode::English, FallbackPolicy::RepeatInEnglish);
        speech.pump_events();
        assert!(engine.fail(SpeechErrorKind::SynthesisFailed("device busy".into())));
        speech.pump_events();

        assert_eq!(engine.spoken().len(), 1);
        assert!(!speech.is_speaking());
        assert_eq!(speech.metrics().failures(), 1);
    }

    // ==================== Preemption Tests ====================

    #[test]
    fn test_new_request_preempts_previous() {
        let engine = RecordingEngine::with_voices(all_voices());
        let mut speech = adapter(&engine);

        speech.speak("a", LanguageCode::English, FallbackPolicy::RepeatInEnglish);
        let second = speech.speak("b", LanguageCode::English, FallbackPolicy::RepeatInEnglish);
        speech.pump_events();

        assert_eq!(engine.audible().map(|u| u.text), Some("b".to_string()));
        assert_eq!(speech.active_utterance(), Some(second));
        assert!(speech.is_speaking());
        assert_eq!(speech.metrics().preempted(), 1);
    }

    #[test]
    fn test_stale_events_are_ignored() {
        let engine = RecordingEngine::with_voices(all_voices());
        let mut speech = adapter(&engine);

        let first = speech.speak("a", LanguageCode::English, FallbackPolicy::RepeatInEnglish);
        speech.speak("b", LanguageCode::English, FallbackPolicy::RepeatInEnglish);
        speech.pump_events();
        assert!(speech.is_speaking());

        speech.handle_event(SpeechEvent::ended(first));
        assert!(speech.is_speaking());

        speech.handle_event(SpeechEvent::failed(first, SpeechErrorKind::LanguageUnavailable));
        assert_eq!(engine.spoken().len(), 2);
    }

    // ==================== Unavailable Fallback Tests ====================

    #[test]
    fn test_unavailable_retries_original_text_in_english() {
        let engine = RecordingEngine::new().with_unavailable_locale("hi-IN");
        let mut speech = adapter(&engine);

        speech.speak("आगे बढ़ें", LanguageCode::Hindi, FallbackPolicy::RepeatInEnglish);
        speech.pump_events();

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1].text, "आगे बढ़ें");
        assert_eq!(spoken[1].locale, FALLBACK_LOCALE);
        assert!(speech.is_speaking());
    }

    #[test]
    fn test_unavailable_announces_language_name() {
        let engine = RecordingEngine::new().with_unavailable_locale("hi-IN");
        let mut speech = adapter(&engine);

        speech.speak("हिंदी", LanguageCode::Hindi, FallbackPolicy::AnnounceLanguageName);
        speech.pump_events();

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1].text, "Hindi");
        assert_eq!(spoken[1].locale, FALLBACK_LOCALE);
    }

    #[test]
    fn test_unavailable_retry_uses_installed_english_voice() {
        let engine = RecordingEngine::with_voices(all_voices()).with_unavailable_locale("hi-IN");
        let mut speech = adapter(&engine);

        speech.speak("आगे बढ़ें", LanguageCode::Hindi, FallbackPolicy::RepeatInEnglish);
        speech.pump_events();

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1].locale, FALLBACK_LOCALE);
        assert_eq!(
            spoken[1].voice.as_ref().map(|v| v.id.as_str()),
            Some("en-us")
        );
    }

    #[test]
    fn test_fallback_is_retried_only_once() {
        let engine = RecordingEngine::new()
            .with_unavailable_locale("hi-IN")
            .with_unavailable_locale("en-US");
        let mut speech = adapter(&engine);

        speech.speak("आगे बढ़ें", LanguageCode::Hindi, FallbackPolicy::RepeatInEnglish);
        speech.pump_events();
        speech.pump_events();

        assert_eq!(engine.spoken().len(), 2);
        assert!(!speech.is_speaking());
        assert_eq!(speech.active_utterance(), None);
        assert_eq!(speech.metrics().fallbacks(), 1);
        assert_eq!(speech.metrics().failures(), 1);
    }

    #[tokio::test]
    async fn test_next_event_delivers_engine_events() {
        let engine = RecordingEngine::with_voices(all_voices());
        let mut speech = adapter(&engine);

        let id = speech.speak("Welcome", LanguageCode::English, FallbackPolicy::RepeatInEnglish);
        let event = speech.next_event().await.expect("event");
        assert_eq!(event, SpeechEvent::started(id));

        speech.handle_event(event);
        assert!(speech.is_speaking());
    }
}
