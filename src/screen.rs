//! Interaction logic of the language-selection screen and speech buttons.
//!
//! Layout is not modelled here, only what happens on each tap.

use crate::context::LanguageContext;
use crate::i18n::{LanguageCode, LanguageOption, LanguageRegistry};
use crate::preference::Storage;
use crate::speech::{SpeechEngine, UtteranceId};
use std::time::Duration;
use tracing::{debug, info};

/// Pause between choosing a language and moving on to onboarding.
pub const ONBOARDING_DELAY: Duration = Duration::from_millis(300);

/// Where the app goes after a screen is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    Onboarding { delay: Duration },
}

/// First screen: pick a language, optionally hearing each one first.
#[derive(Debug, Default)]
pub struct LanguageSelectionScreen {
    selected: Option<LanguageCode>,
}

impl LanguageSelectionScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options in display order.
    pub fn options(&self) -> &'static [LanguageOption] {
        LanguageRegistry::get().list_options()
    }

    /// The highlighted option, once the user has chosen.
    pub fn selected(&self) -> Option<LanguageCode> {
        self.selected
    }

    /// Speaker icon next to an option: say the language's own name.
    pub fn preview<E: SpeechEngine, S: Storage>(
        &self,
        context: &mut LanguageContext<E, S>,
        language: LanguageCode,
    ) -> UtteranceId {
        debug!("Previewing {}", language);
        context.speak_language_name(language)
    }

    /// Tap on an option: persist it and continue to onboarding.
    pub fn choose<E: SpeechEngine, S: Storage>(
        &mut self,
        context: &mut LanguageContext<E, S>,
        language: LanguageCode,
    ) -> Handoff {
        self.selected = Some(language);
        context.set_language(language);
        info!("Language chosen: {}", language);
        Handoff::Onboarding {
            delay: ONBOARDING_DELAY,
        }
    }
}

/// Button that can read a phrase aloud when tapped.
#[derive(Debug, Clone, Default)]
pub struct Button {
    pub label: String,
    pub speak_text: Option<String>,
    pub disabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_speak_text(mut self, text: impl Into<String>) -> Self {
        self.speak_text = Some(text.into());
        self
    }

    /// Tap: speak `speak_text` if set, then run `on_click`. Disabled buttons
    /// do nothing.
    pub fn press<E: SpeechEngine, S: Storage, T>(
        &self,
        context: &mut LanguageContext<E, S>,
        on_click: impl FnOnce() -> T,
    ) -> Option<T> {
        if self.disabled {
            return None;
        }
        if let Some(text) = &self.speak_text {
            context.speak(text);
        }
        Some(on_click())
    }
}

/// Speaker-only button. Disabled while anything is being spoken.
#[derive(Debug, Clone)]
pub struct AudioButton {
    pub text: String,
}

impl AudioButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_enabled<E: SpeechEngine, S: Storage>(&self, context: &LanguageContext<E, S>) -> bool {
        !context.is_speaking()
    }

    /// Tap: speak the text unless speech is already in progress.
    pub fn press<E: SpeechEngine, S: Storage>(
        &self,
        context: &mut LanguageContext<E, S>,
    ) -> Option<UtteranceId> {
        if !self.is_enabled(context) {
            debug!("Audio button ignored while speaking");
            return None;
        }
        Some(context.speak(&self.text))
    }
}
