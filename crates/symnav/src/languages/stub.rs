//! Registered languages without an extraction backend yet.
//!
//! These are dispatchable (so a tag like `go` is not an error) but always
//! produce an empty outline.

use super::LanguageSupport;
use crate::types::{Language, Symbol};

/// A language that is registered but extracts nothing.
#[derive(Debug, Clone, Copy)]
pub struct StubLanguage(Language);

impl LanguageSupport for StubLanguage {
    fn language(&self) -> Language {
        self.0
    }

    fn parse(&self, _content: &str) -> Vec<Symbol> {
        Vec::new()
    }
}

/// JavaScript placeholder backend.
pub static JAVASCRIPT: StubLanguage = StubLanguage(Language::JavaScript);
/// TypeScript placeholder backend.
pub static TYPESCRIPT: StubLanguage = StubLanguage(Language::TypeScript);
/// Python placeholder backend.
pub static PYTHON: StubLanguage = StubLanguage(Language::Python);
/// Go placeholder backend.
pub static GO: StubLanguage = StubLanguage(Language::Go);
/// Rust placeholder backend.
pub static RUST: StubLanguage = StubLanguage(Language::Rust);
