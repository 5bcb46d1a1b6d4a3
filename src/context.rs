//! Language context: the session's language state.
//!
//! Owns the current language, the preference store and the speech adapter.
//! It is constructed once per session and passed to every UI surface that
//! needs translations or speech.

use crate::i18n::{LanguageCode, TranslationStrings};
use crate::preference::{PreferenceStore, Storage};
use crate::speech::{
    FallbackPolicy, SpeakingFlag, SpeechAdapter, SpeechEngine, SpeechEvent, SpeechMetrics,
    UtteranceId,
};
use tracing::{info, warn};

pub struct LanguageContext<E, S> {
    language: LanguageCode,
    translations: &'static TranslationStrings,
    preferences: PreferenceStore<S>,
    speech: SpeechAdapter<E>,
}

impl<E: SpeechEngine, S: Storage> LanguageContext<E, S> {
    /// Start a session: restore the saved language, or use the default.
    pub fn init(preferences: PreferenceStore<S>, speech: SpeechAdapter<E>) -> Self {
        let language = match preferences.load() {
            Some(saved) => {
                info!("Restored language preference: {}", saved);
                saved
            }
            None => {
                info!("No saved language, using default: {}", LanguageCode::default());
                LanguageCode::default()
            }
        };

        Self {
            language,
            translations: TranslationStrings::for_language(language),
            preferences,
            speech,
        }
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    /// Translation table for the current language.
    pub fn translations(&self) -> &'static TranslationStrings {
        self.translations
    }

    pub fn is_speaking(&self) -> bool {
        self.speech.is_speaking()
    }

    /// Read handle for the "is speaking" flag, for other surfaces.
    pub fn speaking_flag(&self) -> SpeakingFlag {
        self.speech.speaking_flag()
    }

    pub fn speech_metrics(&self) -> &SpeechMetrics {
        self.speech.metrics()
    }

    pub fn preferences(&self) -> &PreferenceStore<S> {
        &self.preferences
    }

    pub fn speech(&self) -> &SpeechAdapter<E> {
        &self.speech
    }

    /// Switch language and persist the choice.
    pub fn set_language(&mut self, language: LanguageCode) {
        if language != self.language {
            info!("Language changed: {} -> {}", self.language, language);
        }
        self.language = language;
        self.translations = TranslationStrings::for_language(language);
        self.preferences.save(language);
    }

    /// Switch language from an untrusted code string.
    ///
    /// Unknown codes leave the current language unchanged. Returns the
    /// language in effect afterwards.
    pub fn select_language(&mut self, code: &str) -> LanguageCode {
        match LanguageCode::from_code(code) {
            Ok(language) => self.set_language(language),
            Err(e) => warn!("Ignoring language selection: {}", e),
        }
        self.language
    }

    /// Speak UI text in the current language.
    pub fn speak(&mut self, text: &str) -> UtteranceId {
        self.speech.speak(text, self.language, FallbackPolicy::RepeatInEnglish)
    }

    /// Speak a language's own name in that language, e.g. on the selection
    /// screen before the user has chosen.
    pub fn speak_language_name(&mut self, language: LanguageCode) -> UtteranceId {
        self.speech.speak(
            language.native_name(),
            language,
            FallbackPolicy::AnnounceLanguageName,
        )
    }

    pub fn handle_speech_event(&mut self, event: SpeechEvent) {
        self.speech.handle_event(event);
    }

    /// Apply every speech event that has already arrived.
    pub fn pump_speech_events(&mut self) -> usize {
        self.speech.pump_events()
    }

    /// Wait for the next speech event; apply it with
    /// [`handle_speech_event`](Self::handle_speech_event).
    pub async fn next_speech_event(&mut self) -> Option<SpeechEvent> {
        self.speech.next_event().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::{MemoryStorage, PREFERENCE_KEY};
    use crate::speech::{RecordingEngine, SpeechSettings, Voice};

    fn context_with(storage: MemoryStorage) -> LanguageContext<RecordingEngine, MemoryStorage> {
        let engine = RecordingEngine::with_voices(vec![
            Voice::new("hi", "Hindi", "hi"),
            Voice::new("en-us", "English", "en-us"),
        ]);
        LanguageContext::init(
            PreferenceStore::new(storage),
            SpeechAdapter::new(engine, SpeechSettings::default()),
        )
    }

    fn stored(code: &str) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage.set_item(PREFERENCE_KEY, code).unwrap();
        storage
    }

    // ==================== Init Tests ====================

    #[test]
    fn test_first_session_defaults_to_hindi() {
        let context = context_with(MemoryStorage::new());
        assert_eq!(context.language(), LanguageCode::Hindi);
        assert_eq!(
            context.translations(),
            TranslationStrings::for_language(LanguageCode::Hindi)
        );
        assert!(!context.is_speaking());
    }

    #[test]
    fn test_init_restores_saved_language() {
        let context = context_with(stored("tamil"));
        assert_eq!(context.language(), LanguageCode::Tamil);
        assert_eq!(context.translations().welcome, "வரவேற்கிறோம்");
    }

    #[test]
    fn test_init_ignores_invalid_saved_language() {
        let context = context_with(stored("klingon"));
        assert_eq!(context.language(), LanguageCode::Hindi);
    }

    // ==================== Selection Tests ====================

    #[test]
    fn test_select_language_updates_and_persists() {
        let mut context = context_with(MemoryStorage::new());

        let language = context.select_language("english");

        assert_eq!(language, LanguageCode::English);
        assert_eq!(context.translations().next, "Next");
        assert_eq!(context.preferences().load(), Some(LanguageCode::English));
    }

    #[test]
    fn test_select_language_twice_is_idempotent() {
        let mut once = context_with(MemoryStorage::new());
        once.select_language("tamil");

        let mut twice = context_with(MemoryStorage::new());
        twice.select_language("tamil");
        twice.select_language("tamil");

        assert_eq!(once.language(), twice.language());
        assert_eq!(once.translations(), twice.translations());
        assert_eq!(once.preferences().load(), twice.preferences().load());
    }

    #[test]
    fn test_select_invalid_language_is_ignored() {
        let mut context = context_with(stored("english"));

        let language = context.select_language("klingon");

        assert_eq!(language, LanguageCode::English);
        assert_eq!(context.preferences().load(), Some(LanguageCode::English));
    }

    // ==================== Speech Tests ====================

    #[test]
    fn test_speak_uses_current_language() {
        let mut context = context_with(stored("english"));
        context.speak("Welcome");
        context.pump_speech_events();

        let spoken = context.speech().engine().spoken();
        assert_eq!(spoken[0].locale, "en-US");
        assert!(context.is_speaking());
        assert!(context.speaking_flag().is_speaking());
    }

    #[test]
    fn test_speak_language_name_uses_native_name() {
        let mut context = context_with(MemoryStorage::new());
        context.speak_language_name(LanguageCode::Hindi);

        let spoken = context.speech().engine().spoken();
        assert_eq!(spoken[0].text, "हिंदी");
        assert_eq!(spoken[0].locale, "hi-IN");
    }

    #[test]
    fn test_speak_language_name_tamil_without_voice() {
        let mut context = context_with(MemoryStorage::new());
        context.speak_language_name(LanguageCode::Tamil);

        let spoken = context.speech().engine().spoken();
        assert_eq!(spoken[0].text, "Tamil");
        assert_eq!(spoken[0].locale, "en-US");
    }
}
