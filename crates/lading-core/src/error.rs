//! Error types for the lading-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the lading library.
#[derive(Error, Debug)]
pub enum LadingError {
    /// The document reference does not resolve.
    #[error("PDF file not found at path: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// The directory reference does not resolve or is not a directory.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The directory resolved but holds no matching documents.
    #[error("No PDF files found in directory: {}", .0.display())]
    NoDocuments(PathBuf),

    /// The text-extraction collaborator failed.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LadingError {
    /// Whether this error belongs to the not-found class.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DocumentNotFound(_) | Self::DirectoryNotFound(_) | Self::NoDocuments(_)
        )
    }
}

/// Errors raised while turning a document into raw text.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF layer rejected the document.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// The bytes could not be decoded as text.
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// The underlying extractor panicked.
    #[error("text extractor panicked: {0}")]
    Panicked(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the lading library.
pub type Result<T> = std::result::Result<T, LadingError>;

/// Text of a caught panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
