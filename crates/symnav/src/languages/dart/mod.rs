//! Dart symbol extraction.
//!
//! Extraction is lexical: the scanner tracks strings, comments and brace
//! depth, [`patterns`] recognizes declaration headers at line and member
//! anchors, [`declarations`] builds the top-level outline and [`members`]
//! fills in the members of every type body.
//!
//! Extracted kinds:
//! - `class` / `abstract class` (with `sealed`, `base`, `final`,
//!   `interface` and `mixin class` forms)
//! - `mixin`, `extension` (named and `on T`), `enum`
//! - top-level functions and `final`/`const`/`var` variables
//! - methods, constructors (unnamed, named, `factory`) and fields inside
//!   type bodies

pub mod declarations;
pub mod members;
pub mod patterns;

use tracing::trace;

use super::LanguageSupport;
use crate::position::LineIndex;
use crate::types::{Language, Symbol};

/// Dart language support.
#[derive(Debug, Clone, Copy, Default)]
pub struct DartLanguage;

impl LanguageSupport for DartLanguage {
    fn language(&self) -> Language {
        Language::Dart
    }

    fn parse(&self, content: &str) -> Vec<Symbol> {
        let index = LineIndex::new(content);
        let symbols = declarations::locate_declarations(content, &index);
        trace!(
            lines = index.line_count(),
            top_level = symbols.len(),
            "Located Dart declarations"
        );
        symbols
    }
}
