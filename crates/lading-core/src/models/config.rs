//! Configuration structures for the extraction pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Main configuration for lading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LadingConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Document input configuration.
    pub input: InputConfig,

    /// Result file configuration.
    pub output: OutputConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default bound on stop numbers; the stop table allocates one slot per number.
pub const DEFAULT_MAX_STOP_NUMBER: usize = 100_000;

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Highest stop number accepted into the stop table.
    pub max_stop_number: usize,

    /// Warn when Template-2 line items, dates and descriptions differ in count.
    pub check_alignment: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_stop_number: DEFAULT_MAX_STOP_NUMBER,
            check_alignment: true,
        }
    }
}

/// Which collaborator turns documents into raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Extract embedded text from PDF files.
    #[default]
    Pdf,
    /// Read already-extracted UTF-8 text files.
    Text,
}

/// Document input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Glob applied inside a directory for batch parsing.
    pub document_pattern: String,

    /// Text-extraction collaborator.
    pub source: SourceKind,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            document_pattern: "*.pdf".to_string(),
            source: SourceKind::Pdf,
        }
    }
}

/// Result file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for result files (defaults to the Downloads folder).
    pub directory: Option<PathBuf>,

    /// File name prefix for result files.
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: "shipment_parser".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter: trace, debug, info, warn or error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LadingConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Load from `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LadingConfig =
            serde_json::from_str(r#"{"input": {"source": "text"}}"#).unwrap();

        assert_eq!(config.input.source, SourceKind::Text);
        assert_eq!(config.input.document_pattern, "*.pdf");
        assert_eq!(config.extraction.max_stop_number, DEFAULT_MAX_STOP_NUMBER);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LadingConfig::default();
        config.output.file_prefix = "tender".to_string();
        config.save(&path).unwrap();

        let loaded = LadingConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.output.file_prefix, "tender");

        let missing = LadingConfig::load_or_default(&dir.path().join("none.json")).unwrap();
        assert_eq!(missing.output.file_prefix, "shipment_parser");
    }
}
