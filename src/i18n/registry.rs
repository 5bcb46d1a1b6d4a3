//! Language registry: single source of truth for the supported languages.
//!
//! The registry is an immutable table built once on first access. It carries
//! everything the UI and the speech adapter need to know about a language:
//! its names, flag glyph, speech locale and the English announcement used
//! when the language cannot be vocalized.

use crate::i18n::LanguageCode;
use std::sync::OnceLock;

/// Metadata for one supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    /// Closed-set code this entry describes
    pub code: LanguageCode,

    /// English name of the language (e.g. "Hindi", "Tamil")
    pub name: &'static str,

    /// Name of the language in its own script (e.g. "हिंदी")
    pub native_name: &'static str,

    /// Flag glyph shown next to the language
    pub flag: &'static str,

    /// Locale tag used to pick a synthesis voice (e.g. "hi-IN")
    pub speech_locale: &'static str,

    /// Text announced in English instead of the requested text when no voice
    /// for `speech_locale` exists. `None` means speak with the engine's
    /// default voice for the locale.
    pub fallback_announcement: Option<&'static str>,
}

/// Immutable table of language options, in display order.
pub struct LanguageRegistry {
    options: Vec<LanguageOption>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the process-wide language registry.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            options: default_options(),
        })
    }

    /// All options in display order.
    pub fn list_options(&self) -> &[LanguageOption] {
        &self.options
    }

    /// Option for a code.
    ///
    /// The table holds one entry per [`LanguageCode`] variant, so the lookup
    /// cannot miss; the first entry is returned if it ever did.
    pub fn option(&self, code: LanguageCode) -> &LanguageOption {
        self.options
            .iter()
            .find(|option| option.code == code)
            .unwrap_or(&self.options[0])
    }

    /// Resolve an arbitrary code string to an option.
    ///
    /// Never fails: unknown codes resolve to the first registered option.
    pub fn resolve_option(&self, code: &str) -> &LanguageOption {
        match LanguageCode::from_code(code) {
            Ok(code) => self.option(code),
            Err(_) => &self.options[0],
        }
    }

    /// Speech locale for a code (e.g. "ta-IN").
    pub fn speech_locale(&self, code: LanguageCode) -> &'static str {
        self.option(code).speech_locale
    }
}

fn default_options() -> Vec<LanguageOption> {
    vec![
        LanguageOption {
            code: LanguageCode::Hindi,
            name: "Hindi",
            native_name: "हिंदी",
            flag: "🇮🇳",
            speech_locale: "hi-IN",
            fallback_announcement: None,
        },
        LanguageOption {
            code: LanguageCode::English,
            name: "English",
            native_name: "English",
            flag: "🇬🇧",
            speech_locale: "en-US",
            fallback_announcement: None,
        },
        LanguageOption {
            code: LanguageCode::Tamil,
            name: "Tamil",
            native_name: "தமிழ்",
            flag: "🇮🇳",
            speech_locale: "ta-IN",
            fallback_announcement: Some("Tamil"),
        },
    ]
}
