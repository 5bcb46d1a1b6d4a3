//! LanguageCode: the closed set of languages the app can be used in.
//!
//! Every stored or user-supplied language value goes through
//! [`LanguageCode::from_code`], so anything outside the set is rejected at the
//! boundary and callers fall back to [`LanguageCode::default`].

use crate::i18n::{LanguageOption, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    Hindi,
    English,
    Tamil,
}

impl LanguageCode {
    /// All codes in registry order.
    pub const ALL: [LanguageCode; 3] = [
        LanguageCode::Hindi,
        LanguageCode::English,
        LanguageCode::Tamil,
    ];

    /// Parse a language code string (e.g. "hindi", "tamil").
    ///
    /// # Returns
    /// * `Ok(LanguageCode)` if the code is one of the supported literals
    /// * `Err` for anything else, including differently cased input
    pub fn from_code(code: &str) -> Result<LanguageCode> {
        match code {
            "hindi" => Ok(LanguageCode::Hindi),
            "english" => Ok(LanguageCode::English),
            "tamil" => Ok(LanguageCode::Tamil),
            "" => bail!("Empty language code"),
            other => bail!("Unknown language code: '{}'", other),
        }
    }

    /// The stored/serialized literal for this code.
    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::Hindi => "hindi",
            LanguageCode::English => "english",
            LanguageCode::Tamil => "tamil",
        }
    }

    /// Registry entry for this code.
    pub fn option(&self) -> &'static LanguageOption {
        LanguageRegistry::get().option(*self)
    }

    /// English name of the language (e.g. "Tamil").
    pub fn name(&self) -> &'static str {
        self.option().name
    }

    /// Name of the language in its own script (e.g. "தமிழ்").
    pub fn native_name(&self) -> &'static str {
        self.option().native_name
    }

    /// Locale tag handed to the speech engine (e.g. "ta-IN").
    pub fn speech_locale(&self) -> &'static str {
        self.option().speech_locale
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        LanguageCode::from_code(s)
    }
}
