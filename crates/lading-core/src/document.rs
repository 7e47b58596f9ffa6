//! Document-level orchestration: text extraction, parsing, batch mode and
//! capability dispatch.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{error, info, warn};

use crate::error::{ExtractionError, LadingError, Result};
use crate::models::capability::{
    Capability, CapabilityPayload, CapabilityRequest, CapabilityResponse, UNKNOWN_CAPABILITY,
};
use crate::models::config::{LadingConfig, SourceKind};
use crate::models::shipment::{BatchEntry, BatchResult, ParsedDocument};
use crate::pdf::PdfTextSource;
use crate::shipment::{ShipmentParser, TemplateShipmentParser};

/// Collaborator that turns a document reference into its full raw text.
///
/// Multi-page documents are concatenated in page order.
pub trait TextSource {
    fn extract_text(&self, path: &Path) -> std::result::Result<String, ExtractionError>;
}

impl<F> TextSource for F
where
    F: Fn(&Path) -> std::result::Result<String, ExtractionError>,
{
    fn extract_text(&self, path: &Path) -> std::result::Result<String, ExtractionError> {
        self(path)
    }
}

/// Reads files that already hold extracted UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract_text(&self, path: &Path) -> std::result::Result<String, ExtractionError> {
        let data = std::fs::read(path).map_err(|source| ExtractionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        String::from_utf8(data).map_err(|e| ExtractionError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Parses documents from disk into shipment records.
pub struct DocumentParser {
    source: Box<dyn TextSource>,
    parser: TemplateShipmentParser,
    document_pattern: String,
}

impl DocumentParser {
    /// Create a document parser around a text-extraction collaborator.
    pub fn new(source: impl TextSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            parser: TemplateShipmentParser::new(),
            document_pattern: "*.pdf".to_string(),
        }
    }

    /// Build from configuration, choosing the collaborator from `input.source`.
    pub fn from_config(config: &LadingConfig) -> Self {
        let parser = match config.input.source {
            SourceKind::Pdf => Self::new(PdfTextSource),
            SourceKind::Text => Self::new(PlainTextSource),
        };
        parser
            .with_parser(TemplateShipmentParser::from_config(&config.extraction))
            .with_document_pattern(config.input.document_pattern.clone())
    }

    /// Replace the text-level parser.
    pub fn with_parser(mut self, parser: TemplateShipmentParser) -> Self {
        self.parser = parser;
        self
    }

    /// Set the glob used to pick documents inside a directory.
    pub fn with_document_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.document_pattern = pattern.into();
        self
    }

    /// Parse one document.
    pub fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        if !path.exists() {
            return Err(LadingError::DocumentNotFound(path.to_path_buf()));
        }

        info!("Processing document: {}", path.display());
        let text = self.source.extract_text(path)?;
        let result = self.parser.parse(&text);

        Ok(ParsedDocument {
            template_type: result.template,
            records_count: result.records.len(),
            records: result.records,
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            processed_at: Local::now(),
            warnings: result.warnings,
        })
    }

    /// Documents in `dir` matching the configured pattern, in sorted order.
    pub fn find_documents(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(LadingError::DirectoryNotFound(dir.to_path_buf()));
        }

        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&dir.to_string_lossy()),
            self.document_pattern
        );
        let mut files: Vec<PathBuf> = glob::glob(&pattern)
            .map_err(|e| LadingError::Config(format!("invalid document pattern: {}", e)))?
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    /// Parse every matching document in `dir`.
    ///
    /// A failing document becomes a `Failed` entry; the batch continues.
    pub fn parse_batch(&self, dir: &Path) -> Result<BatchResult> {
        self.parse_batch_with(dir, |_, _| {})
    }

    /// [`parse_batch`](Self::parse_batch), calling `on_document` after each file.
    pub fn parse_batch_with<F>(&self, dir: &Path, mut on_document: F) -> Result<BatchResult>
    where
        F: FnMut(&Path, &BatchEntry),
    {
        let files = self.find_documents(dir)?;
        if files.is_empty() {
            return Err(LadingError::NoDocuments(dir.to_path_buf()));
        }

        info!("Found {} documents in {}", files.len(), dir.display());

        let mut results = Vec::with_capacity(files.len());
        for path in &files {
            let entry = match self.parse(path) {
                Ok(document) => BatchEntry::Parsed(document),
                Err(e) => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    BatchEntry::Failed {
                        file: path.display().to_string(),
                        error: e.to_string(),
                    }
                }
            };
            on_document(path, &entry);
            results.push(entry);
        }

        Ok(BatchResult {
            total_files: files.len(),
            results,
            processed_at: Local::now(),
        })
    }

    /// Serve a capability request. Never fails; errors become the reply's
    /// error descriptor.
    pub fn handle(&self, request: &CapabilityRequest) -> CapabilityResponse {
        let name = request.capability.as_deref().unwrap_or_default();

        let Some(capability) = Capability::from_name(name) else {
            let echoed = request.capability.clone().unwrap_or_else(|| UNKNOWN_CAPABILITY.to_string());
            return CapabilityResponse::failure(echoed, format!("Unknown capability: {}", name));
        };

        let Some(arg) = request.arg(capability.required_arg()) else {
            return CapabilityResponse::failure(
                capability.as_str(),
                format!("Missing required parameter: {}", capability.required_arg()),
            );
        };

        let outcome = match capability {
            Capability::ParsePdf => self.parse(Path::new(arg)).map(CapabilityPayload::Document),
            Capability::ParseDirectory => {
                self.parse_batch(Path::new(arg)).map(CapabilityPayload::Batch)
            }
        };

        match outcome {
            Ok(payload) => CapabilityResponse::success(capability.as_str(), payload),
            Err(e) => {
                error!("Error processing {}: {}", capability.as_str(), e);
                CapabilityResponse::failure(capability.as_str(), e.to_string())
            }
        }
    }
}
