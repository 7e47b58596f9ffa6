//! Core library for shipment tender extraction.
//!
//! This crate provides:
//! - Layout detection for the two known tender templates
//! - Stop/destination indexing and per-line-item field capture
//! - Vendor name and date normalization
//! - PDF text extraction and a document/batch orchestrator (`native` feature)

pub mod error;
pub mod models;
pub mod shipment;
#[cfg(feature = "native")]
pub mod pdf;
#[cfg(feature = "native")]
pub mod document;

pub use error::{panic_message, ExtractionError, LadingError, PdfError, Result};
pub use models::capability::{
    Capability, CapabilityPayload, CapabilityRequest, CapabilityResponse, UNKNOWN_CAPABILITY,
};
pub use models::config::{LadingConfig, SourceKind};
pub use models::shipment::{
    BatchEntry, BatchResult, ParsedDocument, ShipmentRecord, TemplateKind,
    LEGACY_TEMPLATE2_RECORD_TAG,
};
pub use shipment::{
    ExtractionResult, ShipmentExtractor, ShipmentParser, Template1Extractor, Template2Extractor,
    TemplateShipmentParser,
};
#[cfg(feature = "native")]
pub use document::{DocumentParser, PlainTextSource, TextSource};
#[cfg(feature = "native")]
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextSource};
