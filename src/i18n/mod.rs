//! Internationalization (i18n) module for multi-language support.
//!
//! All language-related metadata and localized strings live here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Type-safe, registry-validated `Language` handle
//! - `strings`: Localized field defaults, error-entry text and prompt instructions
//!
//! # Example
//!
//! ```rust,ignore
//! use wordfuel::i18n::Language;
//!
//! let czech = Language::parse("Czech")?;
//! assert!(!czech.is_canonical());
//! println!("{}", czech.strings().untitled);
//! ```

mod language;
mod registry;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{LanguageStrings, CZECH_STRINGS, ENGLISH_STRINGS};
