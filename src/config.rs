//! Configuration for Thesaurize.
//!
//! Every section has defaults, so an empty JSON object is a valid configuration
//! file. The CLI overrides individual values from its flags.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::message::{DEFAULT_MAX_LENGTH, TRUNCATION_MARKER};
use crate::error::{Result, ThesaurizeError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThesaurizeConfig {
    /// Message reconstruction settings.
    pub codec: CodecConfig,
    /// Synonym store settings.
    pub store: StoreConfig,
    /// Loader settings.
    pub loader: LoaderConfig,
    /// Profanity filtering. Disabled when absent.
    pub filter: Option<FilterConfig>,
    /// Words left alone when common words are skipped. The binary falls back to a
    /// built-in English list when this is absent.
    pub ignore_words: Option<Vec<String>>,
}

impl ThesaurizeConfig {
    /// Read a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ThesaurizeError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: ThesaurizeConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.codec.validate()?;
        self.store.validate()?;
        self.loader.validate()?;
        if let Some(filter) = &self.filter {
            filter.validate()?;
        }
        Ok(())
    }
}

/// Message reconstruction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum length of a reconstructed message, in bytes.
    pub max_length: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl CodecConfig {
    fn validate(&self) -> Result<()> {
        if self.max_length <= TRUNCATION_MARKER.len() {
            return Err(ThesaurizeError::invalid_config(format!(
                "codec.max_length must be larger than {}",
                TRUNCATION_MARKER.len()
            )));
        }
        Ok(())
    }
}

/// Synonym store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Set unions per committed transaction during a load.
    pub batch_size: usize,
    /// Lifetime of the per-word access marker, in seconds.
    pub marker_ttl_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            batch_size: 500,
            marker_ttl_secs: 10,
        }
    }
}

impl StoreConfig {
    /// The access marker lifetime as a [`Duration`].
    pub fn marker_ttl(&self) -> Duration {
        Duration::from_secs(self.marker_ttl_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ThesaurizeError::invalid_config(
                "store.batch_size must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Loader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// File name suffix of the thesaurus data file inside the archive.
    pub data_file_suffix: String,
    /// Capacity of the hand-off between parser and writer.
    pub channel_capacity: usize,
    /// Encoding label overriding the one named by the data file.
    pub encoding: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            data_file_suffix: ".dat".to_string(),
            channel_capacity: 1024,
            encoding: None,
        }
    }
}

impl LoaderConfig {
    fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(ThesaurizeError::invalid_config(
                "loader.channel_capacity must be greater than 0",
            ));
        }
        if self.data_file_suffix.is_empty() {
            return Err(ThesaurizeError::invalid_config(
                "loader.data_file_suffix must not be empty",
            ));
        }
        Ok(())
    }
}

/// Profanity filter settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Rule tags that make a rule active.
    pub categories: Vec<String>,
    /// URI of the JSON rule index.
    pub index_url: String,
}

impl FilterConfig {
    /// Create a filter configuration.
    pub fn new<I, S>(categories: I, index_url: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterConfig {
            categories: categories.into_iter().map(Into::into).collect(),
            index_url: index_url.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.index_url.is_empty() {
            return Err(ThesaurizeError::invalid_config(
                "filter.index_url must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ThesaurizeConfig::default();
        assert_eq!(config.codec.max_length, 2000);
        assert_eq!(config.store.batch_size, 500);
        assert_eq!(config.store.marker_ttl(), Duration::from_secs(10));
        assert_eq!(config.loader.data_file_suffix, ".dat");
        assert!(config.filter.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"store": {{"batch_size": 50}}, "filter": {{"categories": ["slur"], "index_url": "file:///tmp/index.json"}}}}"#
        )
        .unwrap();

        let config = ThesaurizeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.batch_size, 50);
        assert_eq!(config.store.marker_ttl_secs, 10);
        assert_eq!(config.codec.max_length, 2000);
        assert_eq!(config.filter.unwrap().categories, vec!["slur"]);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ThesaurizeConfig::default();
        config.store.batch_size = 0;
        assert!(matches!(config.validate(), Err(ThesaurizeError::Config(_))));

        let mut config = ThesaurizeConfig::default();
        config.codec.max_length = 3;
        assert!(config.validate().is_err());

        let mut config = ThesaurizeConfig::default();
        config.loader.channel_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = ThesaurizeConfig::from_file("/nonexistent/thesaurize.json");
        assert!(matches!(result, Err(ThesaurizeError::Config(_))));
    }
}
