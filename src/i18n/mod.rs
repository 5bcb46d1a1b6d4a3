//! Internationalization (i18n) module for multi-language support.
//!
//! All language metadata and localized UI strings live here.
//!
//! # Architecture
//!
//! - `language`: `LanguageCode`, the closed set of supported languages
//! - `registry`: Single source of truth for per-language metadata
//! - `strings`: Translation catalog, one complete table per language
//! - `validator`: Catalog quality checks
//!
//! # Example
//!
//! ```rust,ignore
//! use sakhi::i18n::{LanguageCode, LanguageRegistry, TranslationStrings};
//!
//! let tamil = LanguageCode::from_code("tamil")?;
//! let option = LanguageRegistry::get().option(tamil);
//! let strings = TranslationStrings::for_language(tamil);
//! ```

mod language;
mod registry;
pub(crate) mod strings;
mod validator;

pub use language::LanguageCode;
pub use registry::{LanguageOption, LanguageRegistry};
pub use strings::{TranslationKey, TranslationStrings};
pub use validator::{TranslationValidator, ValidationReport};
