//! Language-specific symbol extraction.
//!
//! Each registered language implements the `LanguageSupport` trait, which
//! turns source text into a symbol outline. [`parse_symbols`] is the single
//! routing point from a wire tag to an implementation.
//!
//! ## Adding a New Language
//!
//! 1. Add the variant to `Language` enum in `types.rs`
//! 2. Create a new module (e.g., `python.rs`) implementing `LanguageSupport`
//! 3. Register it in `get_language_support()`
//!
//! No other component changes.

pub mod dart;
pub mod stub;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Language, Symbol};

/// Trait for language-specific symbol extraction.
///
/// Implementations are stateless: the same content always yields the same
/// outline, and independent calls may run concurrently.
pub trait LanguageSupport: Send + Sync {
    /// The language this implementation handles.
    fn language(&self) -> Language;

    /// File extensions this language handles.
    fn extensions(&self) -> &'static [&'static str] {
        self.language().extensions()
    }

    /// Extract the symbol outline of `content`.
    ///
    /// Malformed content yields fewer symbols, never an error.
    fn parse(&self, content: &str) -> Vec<Symbol>;
}

/// Get the language support implementation for a language.
#[must_use]
pub fn get_language_support(lang: Language) -> &'static dyn LanguageSupport {
    match lang {
        Language::Dart => &dart::DartLanguage,
        Language::JavaScript => &stub::JAVASCRIPT,
        Language::TypeScript => &stub::TYPESCRIPT,
        Language::Python => &stub::PYTHON,
        Language::Go => &stub::GO,
        Language::Rust => &stub::RUST,
    }
}

/// Symbols produced by one dispatched parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSymbols {
    /// Top-level symbols in source order
    pub symbols: Vec<Symbol>,
    /// Wall-clock time spent in the language backend
    pub elapsed: Duration,
}

/// Route `content` to the parser registered for `tag`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedLanguage`] carrying `tag` verbatim when no
/// parser is registered for it.
pub fn parse_symbols(content: &str, tag: &str) -> Result<ParsedSymbols> {
    let language =
        Language::from_tag(tag).ok_or_else(|| Error::UnsupportedLanguage(tag.to_string()))?;
    let support = get_language_support(language);

    let start = Instant::now();
    let symbols = support.parse(content);
    let elapsed = start.elapsed();

    debug!(
        language = %language,
        symbols = symbols.len(),
        bytes = content.len(),
        elapsed_us = elapsed.as_micros(),
        "Parsed symbols"
    );

    Ok(ParsedSymbols { symbols, elapsed })
}
