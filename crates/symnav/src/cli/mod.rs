//! CLI command implementations.

mod display;

pub mod manifest;
pub mod outline;
pub mod request;
pub mod stats;

use std::path::Path;

use symnav::Config;

/// Source text of `file` and the language tag to parse it with.
///
/// An explicit `language` wins; otherwise the tag comes from the file
/// extension through `config`.
fn load_source(
    file: &Path,
    language: Option<&str>,
    config: &Config,
) -> Result<(String, String), symnav::Error> {
    let tag = match language {
        Some(tag) => tag.to_string(),
        None => config.language_for_path(file).ok_or_else(|| {
            symnav::Error::Config(format!(
                "cannot detect language of '{}'; pass --language",
                file.display()
            ))
        })?,
    };
    let content = std::fs::read_to_string(file)?;
    Ok((content, tag))
}
