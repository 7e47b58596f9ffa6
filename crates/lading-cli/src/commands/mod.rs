//! Subcommands of the `lading` binary.

pub mod batch;
pub mod config;
pub mod invoke;
pub mod process;

use std::path::PathBuf;

use lading_core::{LadingConfig, SourceKind};

/// Text-extraction collaborator selectable on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SourceArg {
    /// Embedded PDF text
    Pdf,
    /// Already-extracted UTF-8 text files
    Text,
}

impl From<SourceArg> for SourceKind {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Pdf => SourceKind::Pdf,
            SourceArg::Text => SourceKind::Text,
        }
    }
}

/// Apply a `--source` override to the loaded configuration.
pub fn with_source(mut config: LadingConfig, source: Option<SourceArg>) -> LadingConfig {
    if let Some(source) = source {
        config.input.source = source.into();
    }
    config
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lading")
        .join("config.json")
}

/// Directory for result files: configured, else Downloads, else the working directory.
pub fn default_output_dir(config: &LadingConfig) -> PathBuf {
    config
        .output
        .directory
        .clone()
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
