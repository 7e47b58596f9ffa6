//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::document::TextSource;
use crate::error::{panic_message, ExtractionError, PdfError};

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// pdf-extract panics on some malformed font programs; [`PdfTextSource`]
    /// turns such a panic into an error.
    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Text-extraction collaborator reading PDF files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl TextSource for PdfTextSource {
    fn extract_text(&self, path: &Path) -> std::result::Result<String, ExtractionError> {
        let data = std::fs::read(path).map_err(|source| ExtractionError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        catch_extractor_panic(|| {
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            let text = extractor.extract_text()?;

            debug!(
                "Extracted {} characters from {} pages of {}",
                text.len(),
                extractor.page_count(),
                path.display()
            );
            Ok(text)
        })
    }
}

fn catch_extractor_panic<T>(
    extract: impl FnOnce() -> std::result::Result<T, ExtractionError>,
) -> std::result::Result<T, ExtractionError> {
    panic::catch_unwind(AssertUnwindSafe(extract))
        .unwrap_or_else(|payload| Err(ExtractionError::Panicked(panic_message(payload.as_ref()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_load_rejects_non_pdf() {
        let mut extractor = PdfExtractor::new();
        let result = extractor.load(b"this is not a PDF");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_source_reports_missing_file_as_read_error() {
        let result = PdfTextSource.extract_text(Path::new("/nonexistent/lading/tender.pdf"));
        assert!(matches!(result, Err(ExtractionError::Read { .. })));
    }

    #[test]
    fn test_extractor_panic_becomes_panicked_error() {
        let result: std::result::Result<String, _> =
            catch_extractor_panic(|| panic!("bad font program"));

        match result {
            Err(ExtractionError::Panicked(message)) => assert_eq!(message, "bad font program"),
            other => panic!("expected Panicked, got {:?}", other),
        }
    }

    #[test]
    fn test_extractor_errors_pass_through() {
        let result: std::result::Result<String, _> =
            catch_extractor_panic(|| Err(PdfError::NoPages.into()));
        assert!(matches!(result, Err(ExtractionError::Pdf(PdfError::NoPages))));
    }
}
