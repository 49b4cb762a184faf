//! Configuration structures for the recognition pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration for numrec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumrecConfig {
    /// Culture identifier (e.g. "en-us", "zh-cn").
    pub culture: String,

    /// Extraction behaviour switches.
    pub options: ExtractionOptions,

    /// Result cache configuration.
    pub cache: CacheConfig,

    /// Output configuration used by the CLI.
    pub output: OutputConfig,
}

/// Extraction behaviour switches shared by every extractor of a recognizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    /// Drop relative ordinals ("the next one", "the last") from ordinal extraction.
    pub suppress_extended_types: bool,

    /// Accept ambiguous fraction connectors such as "one in five".
    pub experimental_mode: bool,

    /// Wall-clock budget per pattern scan in milliseconds. A pattern that exceeds it
    /// contributes no matches for that call.
    pub match_budget_ms: Option<u64>,
}

impl ExtractionOptions {
    pub fn match_budget(&self) -> Option<Duration> {
        self.match_budget_ms.map(Duration::from_millis)
    }
}

/// Extraction result cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache extraction results keyed by input text.
    pub enabled: bool,

    /// Maximum number of cached inputs per extractor. Inputs beyond this are not cached.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            capacity: 1024,
        }
    }
}

/// CLI output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print extraction results without resolving values.
    pub extract_only: bool,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl NumrecConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Culture identifier, falling back to English when unset.
    pub fn culture_or_default(&self) -> &str {
        if self.culture.trim().is_empty() {
            "en-us"
        } else {
            &self.culture
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: NumrecConfig =
            serde_json::from_str(r#"{"culture": "zh-cn", "options": {"experimental_mode": true}}"#)
                .unwrap();

        assert_eq!(config.culture, "zh-cn");
        assert!(config.options.experimental_mode);
        assert!(!config.options.suppress_extended_types);
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_culture_fallback() {
        assert_eq!(NumrecConfig::default().culture_or_default(), "en-us");
    }

    #[test]
    fn test_match_budget() {
        let options = ExtractionOptions {
            match_budget_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(options.match_budget(), Some(Duration::from_millis(250)));
    }
}
