//! Configuration for the boundary layer and the CLI.
//!
//! Loaded from a YAML file (`.symnav.yaml` by default). Every field is
//! optional; a missing default file means default settings.
//!
//! ```yaml
//! max-content-bytes: 1048576
//! extensions:
//!   dartx: dart
//!   es6: javascript
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Language;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".symnav.yaml";

/// Settings shared by the boundary layer and the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Reject content larger than this many bytes before dispatch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_content_bytes: Option<usize>,

    /// Extra file extension to language tag mappings, checked before the
    /// built-in ones
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not valid configuration YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load `.symnav.yaml` from `dir`, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for a file that exists.
    pub fn load_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            debug!(path = %path.display(), "Loading configuration");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from YAML text.
    ///
    /// Extension mappings must name a registered language. Extension keys
    /// are lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid YAML, unknown fields, or
    /// mappings to an unregistered language tag.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.extensions = config
            .extensions
            .into_iter()
            .map(|(ext, tag)| (ext.to_ascii_lowercase(), tag))
            .collect();

        if let Some((ext, tag)) = config
            .extensions
            .iter()
            .find(|(_, tag)| Language::from_tag(tag).is_none())
        {
            return Err(Error::Config(format!(
                "extension '{ext}' maps to unsupported language '{tag}'"
            )));
        }
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))
    }

    /// Language tag for `path`, from its extension.
    ///
    /// Configured mappings take precedence over the built-in extensions.
    #[must_use]
    pub fn language_for_path(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.extensions
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(&ext))
            .map(|(_, tag)| tag.clone())
            .or_else(|| Language::from_extension(&ext).map(|lang| lang.as_str().to_string()))
    }

    /// Check `size` against the configured content limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContentTooLarge`] when a limit is set and exceeded.
    pub fn check_content_size(&self, size: usize) -> Result<()> {
        match self.max_content_bytes {
            Some(limit) if size > limit => Err(Error::ContentTooLarge { size, limit }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn default_has_no_limit_and_no_mappings() {
        let config = Config::default();
        assert_eq!(config.max_content_bytes, None);
        assert!(config.extensions.is_empty());
        assert!(config.check_content_size(usize::MAX).is_ok());
    }

    #[test]
    fn parses_all_fields() {
        let config = Config::from_yaml("max-content-bytes: 10\nextensions:\n  dartx: dart\n")
            .expect("valid config");

        assert_eq!(config.max_content_bytes, Some(10));
        assert_eq!(config.extensions.get("dartx").map(String::as_str), Some("dart"));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_yaml("  \n").expect("empty config"), Config::default());
    }

    #[rstest]
    #[case::not_yaml("max-content-bytes: [")]
    #[case::wrong_type("max-content-bytes: lots")]
    #[case::unknown_field("max_bytes: 10")]
    #[case::unsupported_language("extensions:\n  cob: cobol")]
    fn invalid_config_is_a_config_error(#[case] yaml: &str) {
        let err = Config::from_yaml(yaml).expect_err("config should be rejected");
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
    }

    #[test]
    fn yaml_round_trips() {
        let mut config = Config {
            max_content_bytes: Some(2048),
            ..Config::default()
        };
        config.extensions.insert("es6".to_string(), "javascript".to_string());

        let yaml = config.to_yaml().expect("serialize");
        assert_eq!(Config::from_yaml(&yaml).expect("parse"), config);
    }

    #[test]
    fn load_default_without_file_uses_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = Config::load_default(dir.path()).expect("defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_default_reads_the_config_file() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "max-content-bytes: 5\n")
            .expect("write config");

        let config = Config::load_default(dir.path()).expect("config");
        assert_eq!(config.max_content_bytes, Some(5));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().expect("tempdir");
        let err = Config::load(&dir.path().join("absent.yaml")).expect_err("missing file");
        assert!(matches!(err, Error::Io(_)));
    }

    #[rstest]
    #[case::builtin("lib/main.dart", Some("dart"))]
    #[case::uppercase("LIB/MAIN.DART", Some("dart"))]
    #[case::configured("gen/model.dartx", Some("dart"))]
    #[case::override_builtin("src/app.js", Some("typescript"))]
    #[case::unknown("README.md", None)]
    #[case::no_extension("Makefile", None)]
    fn detects_language_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        let mut config = Config::default();
        config.extensions.insert("dartx".to_string(), "dart".to_string());
        config.extensions.insert("js".to_string(), "typescript".to_string());

        assert_eq!(config.language_for_path(Path::new(path)).as_deref(), expected);
    }

    #[test]
    fn extension_keys_match_regardless_of_case() {
        let config = Config::from_yaml("extensions:\n  DARTX: dart\n").expect("valid config");

        assert_eq!(config.extensions.get("dartx").map(String::as_str), Some("dart"));
        assert_eq!(
            config.language_for_path(Path::new("gen/model.dartx")).as_deref(),
            Some("dart")
        );
        assert_eq!(
            config.language_for_path(Path::new("gen/MODEL.DartX")).as_deref(),
            Some("dart")
        );
    }

    #[test]
    fn programmatic_keys_are_compared_without_case() {
        let mut config = Config::default();
        config.extensions.insert("ES6".to_string(), "javascript".to_string());

        assert_eq!(
            config.language_for_path(Path::new("app.es6")).as_deref(),
            Some("javascript")
        );
    }

    #[test]
    fn content_over_limit_is_rejected() {
        let config = Config {
            max_content_bytes: Some(4),
            ..Config::default()
        };
        assert!(config.check_content_size(4).is_ok());
        assert!(matches!(
            config.check_content_size(5),
            Err(Error::ContentTooLarge { size: 5, limit: 4 })
        ));
    }
}
