//! Domain types for symnav symbol outlines.
//!
//! These types represent the output model:
//! - **Tree**: `Symbol` nodes nested through `children`
//! - **Coordinates**: `Location` (byte offsets plus 0-based line/column)
//! - **Tags**: `Language` and `SymbolKind` closed enumerations
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Language | Enum not String | Tags are resolved once, at dispatch |
//! | parent | String, empty at top level | Matches the wire contract consumers already read |
//! | metadata | `BTreeMap` | Deterministic serialization order |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Languages with a registered parser backend.
///
/// Adding a new language requires implementing the `LanguageSupport` trait and
/// registering it in `languages::get_language_support`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Dart source files (`.dart`)
    Dart,
    /// JavaScript source files (`.js`, `.mjs`, `.cjs`, `.jsx`)
    JavaScript,
    /// TypeScript source files (`.ts`, `.tsx`)
    TypeScript,
    /// Python source files (`.py`)
    Python,
    /// Go source files (`.go`)
    Go,
    /// Rust source files (`.rs`)
    Rust,
}

impl Language {
    /// Every registered language, in manifest order.
    pub const ALL: [Language; 6] = [
        Self::Dart,
        Self::JavaScript,
        Self::TypeScript,
        Self::Python,
        Self::Go,
        Self::Rust,
    ];

    /// The wire tag for this language.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dart => "dart",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }

    /// Resolve a wire tag. Tags are matched exactly.
    ///
    /// # Returns
    ///
    /// `None` if the tag is not registered.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.as_str() == tag)
    }

    /// File extensions handled by this language.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Dart => &["dart"],
            Self::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Self::TypeScript => &["ts", "tsx"],
            Self::Python => &["py"],
            Self::Go => &["go"],
            Self::Rust => &["rs"],
        }
    }

    /// Detect language from file extension.
    ///
    /// # Returns
    ///
    /// `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a detected declaration.
///
/// The wire names match the editor's symbol kind enumeration. Kinds marked
/// reserved are part of the contract but no backend produces them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Concrete class
    #[serde(rename = "class_declaration")]
    Class,
    /// Class declared `abstract`
    AbstractClass,
    /// Mixin declaration
    Mixin,
    /// Extension declaration
    Extension,
    /// Enum declaration
    #[serde(rename = "enum_declaration")]
    Enum,
    /// Type alias (reserved)
    Typedef,
    /// Top-level function
    Function,
    /// Method of a type
    Method,
    /// Constructor of a type (including named and factory constructors)
    Constructor,
    /// Getter (reserved)
    Getter,
    /// Setter (reserved)
    Setter,
    /// Field of a type
    Field,
    /// Property (reserved)
    Property,
    /// Constant (reserved)
    Constant,
    /// Top-level variable
    Variable,
    /// Enum value (reserved)
    EnumValue,
    /// Parameter (reserved)
    Parameter,
}

impl SymbolKind {
    /// The wire name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class_declaration",
            Self::AbstractClass => "abstract_class",
            Self::Mixin => "mixin",
            Self::Extension => "extension",
            Self::Enum => "enum_declaration",
            Self::Typedef => "typedef",
            Self::Function => "function",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Getter => "getter",
            Self::Setter => "setter",
            Self::Field => "field",
            Self::Property => "property",
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::EnumValue => "enum_value",
            Self::Parameter => "parameter",
        }
    }

    /// Whether symbols of this kind own a body whose members are extracted.
    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Self::Class | Self::AbstractClass | Self::Mixin | Self::Extension | Self::Enum
        )
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Location and Symbol
// ============================================================================

/// Where a declaration sits in the source.
///
/// Lines and columns are 0-based. Offsets are raw byte positions of the
/// delimiters as found; for brace-delimited declarations `end_offset` is the
/// position of the closing `}` itself, not one past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    /// Starting line (0-indexed)
    pub start_line: usize,
    /// Starting column in bytes (0-indexed)
    pub start_column: usize,
    /// Ending line (0-indexed)
    pub end_line: usize,
    /// Ending column in bytes (0-indexed)
    pub end_column: usize,
    /// Byte offset of the first token of the declaration
    pub start_offset: usize,
    /// Byte offset of the end delimiter
    pub end_offset: usize,
}

/// A node in the symbol outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Identifier text
    pub name: String,
    /// Classification
    pub kind: SymbolKind,
    /// Source span
    pub location: Location,
    /// Name of the enclosing type, empty at top level
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent: String,
    /// Nested symbols in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
    /// Per-kind extra data
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Symbol {
    /// Create a top-level symbol with no children.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SymbolKind, location: Location) -> Self {
        Self {
            name: name.into(),
            kind,
            location,
            parent: String::new(),
            children: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Set the enclosing type name.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = parent.into();
        self
    }

    /// Attach nested symbols.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Symbol>) -> Self {
        self.children = children;
        self
    }

    /// Visit this symbol and all of its descendants, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Symbol)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Count symbols by kind across whole trees, descendants included.
#[must_use]
pub fn count_by_kind(symbols: &[Symbol]) -> BTreeMap<SymbolKind, usize> {
    let mut counts = BTreeMap::new();
    for symbol in symbols {
        symbol.walk(&mut |s| *counts.entry(s.kind).or_insert(0) += 1);
    }
    counts
}
