//! Request/response boundary for hosts that embed the parser.
//!
//! A host sends a serialized [`ParseRequest`] and receives a serialized
//! [`ParseResponse`]. The engine itself never logs failures; this layer
//! does, since it is the last place that sees the error before it turns
//! into a bare failure code.
//!
//! Hosts that exchange bytes through handles rather than slices use
//! [`BufferTable`]: the host allocates a buffer, writes the request into
//! it, calls [`BufferTable::parse_symbols`], reads the response through the
//! packed `(handle, length)` result, and releases both buffers. Ownership of
//! every buffer passes explicitly through `alloc`/`store` and `release`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::languages::parse_symbols;
use crate::types::{count_by_kind, Language, Symbol, SymbolKind};

// ============================================================================
// Request / response
// ============================================================================

/// A request to outline one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    /// Full source text
    pub content: String,
    /// Language tag, e.g. `dart`
    pub language: String,
    /// Path of the document, informational only
    #[serde(default)]
    pub file_path: String,
}

impl ParseRequest {
    /// Build a request without a file path.
    #[must_use]
    pub fn new(content: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language: language.into(),
            file_path: String::new(),
        }
    }
}

/// The outline of one document plus summary figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Top-level symbols in source order
    pub symbols: Vec<Symbol>,
    /// The request's language tag, echoed
    pub language: String,
    /// Whole milliseconds spent parsing
    pub parse_duration_ms: u64,
    /// Symbol counts by kind, over every symbol at every depth
    pub statistics: BTreeMap<SymbolKind, usize>,
}

/// Parse one request.
///
/// # Errors
///
/// Returns [`Error::ContentTooLarge`] if `config` sets a content limit the
/// request exceeds, and [`Error::UnsupportedLanguage`] for an unregistered
/// language tag.
pub fn handle_request(request: &ParseRequest, config: &Config) -> Result<ParseResponse> {
    let outcome = config
        .check_content_size(request.content.len())
        .and_then(|()| parse_symbols(&request.content, &request.language));

    let parsed = match outcome {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(
                language = %request.language,
                file = %request.file_path,
                error = %e,
                "Rejected parse request"
            );
            return Err(e);
        }
    };

    let statistics = count_by_kind(&parsed.symbols);
    debug!(
        language = %request.language,
        file = %request.file_path,
        symbols = parsed.symbols.len(),
        "Handled parse request"
    );

    Ok(ParseResponse {
        symbols: parsed.symbols,
        language: request.language.clone(),
        parse_duration_ms: u64::try_from(parsed.elapsed.as_millis()).unwrap_or(u64::MAX),
        statistics,
    })
}

/// Parse a JSON-encoded request into a JSON-encoded response.
///
/// # Errors
///
/// Returns [`Error::Json`] for undecodable request bytes, plus everything
/// [`handle_request`] returns.
pub fn handle_request_json(input: &[u8], config: &Config) -> Result<Vec<u8>> {
    let request: ParseRequest = serde_json::from_slice(input).inspect_err(|e| {
        warn!(error = %e, bytes = input.len(), "Failed to decode parse request");
    })?;
    let response = handle_request(&request, config)?;
    Ok(serde_json::to_vec(&response)?)
}

// ============================================================================
// Manifest
// ============================================================================

/// Identifier the host registers this parser under
pub const MANIFEST_ID: &str = "wasm.symbol-navigator";

/// Self-description a host reads before sending requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Stable identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Crate version
    pub version: String,
    /// One-line description
    pub description: String,
    /// Maintainer
    pub author: String,
    /// `parse.<tag>` for every registered language
    pub capabilities: Vec<String>,
}

/// Build the manifest for this build.
#[must_use]
pub fn manifest() -> Manifest {
    Manifest {
        id: MANIFEST_ID.to_string(),
        name: "Symbol Navigator".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Lexical symbol outline parser for source files".to_string(),
        author: env!("CARGO_PKG_AUTHORS").to_string(),
        capabilities: Language::ALL
            .iter()
            .map(|lang| format!("parse.{lang}"))
            .collect(),
    }
}

// ============================================================================
// Buffer handoff
// ============================================================================

/// Pack a buffer handle and byte length into one result word.
///
/// The upper 32 bits hold the handle, the lower 32 the length. Handles are
/// never 0, so 0 is free to mean failure.
#[must_use]
pub fn pack_result(handle: u32, len: u32) -> u64 {
    (u64::from(handle) << 32) | u64::from(len)
}

/// Split a result word into `(handle, length)`, or `None` for failure.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn unpack_result(packed: u64) -> Option<(u32, u32)> {
    if packed == 0 {
        return None;
    }
    Some(((packed >> 32) as u32, packed as u32))
}

/// Byte buffers owned on behalf of a host, addressed by handle.
///
/// A buffer lives from `alloc`/`store` until `release`; after release its
/// handle is unknown.
#[derive(Debug)]
pub struct BufferTable {
    buffers: HashMap<u32, Vec<u8>>,
    next_handle: u32,
}

impl Default for BufferTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Allocate a zeroed buffer of `size` bytes.
    pub fn alloc(&mut self, size: usize) -> u32 {
        self.store(vec![0; size])
    }

    /// Take ownership of `bytes` and return their handle.
    pub fn store(&mut self, bytes: Vec<u8>) -> u32 {
        let handle = self.next_free_handle();
        self.buffers.insert(handle, bytes);
        handle
    }

    /// Replace the contents of a buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHandle`] if `handle` is not live.
    pub fn write(&mut self, handle: u32, bytes: &[u8]) -> Result<()> {
        let buffer = self
            .buffers
            .get_mut(&handle)
            .ok_or(Error::UnknownHandle(handle))?;
        buffer.clear();
        buffer.extend_from_slice(bytes);
        Ok(())
    }

    /// Borrow the contents of a buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHandle`] if `handle` is not live.
    pub fn read(&self, handle: u32) -> Result<&[u8]> {
        self.buffers
            .get(&handle)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownHandle(handle))
    }

    /// Release a buffer, handing its bytes back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHandle`] if `handle` is not live, including a
    /// second release of the same handle.
    pub fn release(&mut self, handle: u32) -> Result<Vec<u8>> {
        self.buffers
            .remove(&handle)
            .ok_or(Error::UnknownHandle(handle))
    }

    /// Number of live buffers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether no buffers are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Parse the JSON request in buffer `input`.
    ///
    /// On success the response is stored in a new buffer and the packed
    /// `(handle, length)` is returned; the host releases it. Any failure
    /// returns 0. The input buffer stays live either way.
    pub fn parse_symbols(&mut self, input: u32, config: &Config) -> u64 {
        let response = self
            .read(input)
            .and_then(|bytes| handle_request_json(bytes, config));
        match response {
            Ok(bytes) => self.store_result(bytes),
            Err(e) => {
                warn!(handle = input, error = %e, "Parse call failed");
                0
            }
        }
    }

    /// Store the JSON manifest and return its packed `(handle, length)`.
    pub fn manifest(&mut self) -> u64 {
        match serde_json::to_vec(&manifest()) {
            Ok(bytes) => self.store_result(bytes),
            Err(e) => {
                warn!(error = %e, "Failed to serialize manifest");
                0
            }
        }
    }

    fn store_result(&mut self, bytes: Vec<u8>) -> u64 {
        let Ok(len) = u32::try_from(bytes.len()) else {
            warn!(bytes = bytes.len(), "Result too large to address");
            return 0;
        };
        if len == 0 {
            return 0;
        }
        pack_result(self.store(bytes), len)
    }

    fn next_free_handle(&mut self) -> u32 {
        loop {
            let handle = self.next_handle;
            self.next_handle = self.next_handle.checked_add(1).unwrap_or(1);
            if handle != 0 && !self.buffers.contains_key(&handle) {
                return handle;
            }
        }
    }
}
