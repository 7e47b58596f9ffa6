//! Shipment record extraction from raw tender text.

mod parser;
pub mod rules;
mod template1;
mod template2;

pub use parser::{ExtractionResult, ShipmentParser, TemplateShipmentParser};
pub use template1::Template1Extractor;
pub use template2::Template2Extractor;

use tracing::warn;

use crate::models::shipment::ShipmentRecord;
use rules::{classify_vendor_name, StopTable, VendorNameShape};

/// Records produced by one layout extractor, with non-fatal diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Records in document order.
    pub records: Vec<ShipmentRecord>,
    /// Degraded-field warnings.
    pub warnings: Vec<String>,
}

/// Trait for layout-specific record extractors.
pub trait ShipmentExtractor {
    /// Build records from raw text and the document's stop table.
    fn extract(&self, text: &str, stops: &StopTable) -> Extraction;
}

impl Extraction {
    fn push_warning(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    /// Bare vendor name; an unrecognized shape is kept whole and reported.
    fn vendor_name(&mut self, vendor_block: &str) -> String {
        let (name, shape) = classify_vendor_name(vendor_block);
        if shape == VendorNameShape::Unrecognized && !name.is_empty() {
            self.push_warning(format!(
                "Could not extract vendor name from {:?}, returning full string",
                name
            ));
        }
        name
    }
}
