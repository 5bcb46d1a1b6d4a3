//! Translation catalog validation.
//!
//! The compiler already guarantees every table has every phrase. This module
//! checks what it cannot: that no phrase is blank, and that translations keep
//! the sentence markers of the canonical English phrase (a trailing `?`, `!`
//! or `...`, and ` / ` separators between alternatives).

use crate::i18n::{LanguageCode, TranslationKey, TranslationStrings};
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Critical errors (blank phrases)
    pub errors: Vec<String>,

    /// Non-critical warnings (lost punctuation or separators)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog quality.
pub struct TranslationValidator;

static TERMINAL_MARKER_REGEX: OnceLock<Regex> = OnceLock::new();
static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate every non-English table against the English one.
    pub fn validate_catalog() -> ValidationReport {
        let canonical = TranslationStrings::for_language(LanguageCode::English);
        let mut report = ValidationReport::new();

        for language in LanguageCode::ALL {
            let table = TranslationStrings::for_language(language);
            report.merge(Self::validate_table(language, canonical, table));
        }

        report
    }

    /// Validate one table against the canonical table, key by key.
    pub fn validate_table(
        language: LanguageCode,
        canonical: &TranslationStrings,
        table: &TranslationStrings,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        for &key in TranslationKey::ALL {
            let mut phrase_report = Self::validate(canonical.get(key), table.get(key));
            let prefix = format!("{}:{}", language, key.name());
            phrase_report.errors = phrase_report
                .errors
                .into_iter()
                .map(|e| format!("{}: {}", prefix, e))
                .collect();
            phrase_report.warnings = phrase_report
                .warnings
                .into_iter()
                .map(|w| format!("{}: {}", prefix, w))
                .collect();
            report.merge(phrase_report);
        }

        report
    }

    /// Validate that a translated phrase keeps the markers of the original.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        if translated.trim().is_empty() {
            report.errors.push("Phrase is empty".to_string());
            return report;
        }

        let orig_marker = Self::extract_terminal_marker(original);
        let trans_marker = Self::extract_terminal_marker(translated);
        if orig_marker != trans_marker {
            report.warnings.push(format!(
                "Terminal marker mismatch: original has {:?}, translation has {:?}",
                orig_marker, trans_marker
            ));
        }

        let orig_separators = Self::count_separators(original);
        let trans_separators = Self::count_separators(translated);
        if orig_separators != trans_separators {
            report.warnings.push(format!(
                "Separator count mismatch: original has {}, translation has {}",
                orig_separators, trans_separators
            ));
        }

        report
    }

    /// Trailing `?`, `!` or `...` of a phrase, if any
    fn extract_terminal_marker(text: &str) -> Option<String> {
        let regex = TERMINAL_MARKER_REGEX
            .get_or_init(|| Regex::new(r"(\.\.\.|\?|!)\s*$").expect("valid regex"));

        regex
            .captures(text)
            .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()))
    }

    /// Number of ` / ` separators between alternatives
    fn count_separators(text: &str) -> usize {
        let regex = SEPARATOR_REGEX.get_or_init(|| Regex::new(r"\s/\s").expect("valid regex"));
        regex.find_iter(text).count()
    }
}
