//! # symnav: Symbol Outlines for Source Files
//!
//! symnav turns the text of one source file into a tree of named
//! declarations (classes, mixins, functions, methods, fields, ...) with
//! exact positions. It is designed to back "go to symbol" and outline views
//! in editors, where a fast approximate answer beats a slow exact one.
//!
//! ## Design Philosophy
//!
//! - **Lexical, not semantic** - Strings and comments are understood; types and
//!   scopes are not
//! - **Never fails on input** - Malformed source yields fewer symbols, not errors
//! - **Stateless** - Every call is independent and may run concurrently
//! - **Language extensible** - Dart today; other tags are registered with empty
//!   backends
//!
//! ## Quick Start
//!
//! ```
//! use symnav::{parse_symbols, SymbolKind};
//!
//! let parsed = parse_symbols("class Greeter {\n  void greet() {}\n}\n", "dart")?;
//!
//! let class = &parsed.symbols[0];
//! assert_eq!(class.name, "Greeter");
//! assert_eq!(class.children[0].kind, SymbolKind::Method);
//! assert_eq!(class.children[0].parent, "Greeter");
//! # Ok::<(), symnav::Error>(())
//! ```

pub mod boundary;
pub mod config;
mod error;
pub mod languages;
pub mod position;
pub mod scanner;
mod types;

pub use boundary::{
    handle_request, handle_request_json, manifest, pack_result, unpack_result, BufferTable,
    Manifest, ParseRequest, ParseResponse,
};
pub use config::Config;
pub use error::{Error, Result};
pub use languages::{get_language_support, parse_symbols, LanguageSupport, ParsedSymbols};
pub use position::LineIndex;
pub use types::{count_by_kind, Language, Location, Symbol, SymbolKind};
