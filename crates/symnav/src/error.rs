//! Error types for symnav operations.
//!
//! The parsing engine itself has exactly one failure mode: a language tag
//! that no backend is registered for. Everything else about the input is
//! tolerated. Malformed source never produces an error, it produces fewer
//! symbols or spans that run to the end of the input.
//!
//! The remaining variants belong to the boundary layer and the CLI, which
//! deal with files, configuration and serialized requests.
//!
//! ## Error Categorization
//!
//! - Input problems (caller's fault): unsupported language, oversized content,
//!   bad configuration, malformed request bytes, unknown buffer handles
//! - Internal problems (environment's fault): I/O errors

use thiserror::Error;

/// Result type for symnav operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for symnav operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No parser is registered for the requested language tag
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Content exceeds the configured size limit
    #[error("content is {size} bytes, limit is {limit} bytes")]
    ContentTooLarge {
        /// Size of the rejected content in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// A buffer handle was used after release or was never allocated
    #[error("unknown buffer handle: {0}")]
    UnknownHandle(u32),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// Request or response (de)serialization failed
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this is an input problem the caller can fix.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
