//! Shipment record and result envelope models.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Known document layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Single document-level pickup/delivery date.
    #[default]
    #[serde(rename = "Template-1")]
    One,
    /// Pickup/delivery date-time per line item.
    #[serde(rename = "Template-2")]
    Two,
}

impl TemplateKind {
    /// Label used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "Template-1",
            Self::Two => "Template-2",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Template label stamped on records produced from Template-2 documents.
///
/// Downstream consumers of the legacy producer expect `Template-1` on every
/// record regardless of layout; the document-level `template_type` still
/// reports the detected layout.
pub const LEGACY_TEMPLATE2_RECORD_TAG: TemplateKind = TemplateKind::One;

/// One extracted shipment line.
///
/// Quantities are kept verbatim (thousands separators included).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Layout tag.
    pub template: TemplateKind,

    /// Pickup date as `DD/MM/YYYY`, or empty.
    pub pickup_date: String,

    /// Delivery date as `DD/MM/YYYY`, or empty.
    #[serde(rename = "del_date")]
    pub delivery_date: String,

    /// Origin stop text.
    pub ship_from: String,

    /// Destination stop text.
    pub ship_to: String,

    /// Vendor number.
    #[serde(rename = "vendor_no")]
    pub vendor_number: String,

    /// Cleaned vendor name.
    pub vendor_name: String,

    pub cubes: String,
    pub weight: String,
    pub pieces: String,

    /// Purchase-order number suffix.
    #[serde(rename = "po")]
    pub purchase_order: String,

    /// Parenthetical code next to the PO, e.g. `GROC`.
    pub shipment_type: String,

    /// Reserved, always empty.
    pub pallets: String,

    /// Pallet/product description.
    pub description: String,
}

/// Successful parse of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Detected layout.
    pub template_type: TemplateKind,

    /// Number of records.
    pub records_count: usize,

    /// Records in document order.
    pub records: Vec<ShipmentRecord>,

    /// Source file name (no directory).
    pub file_name: String,

    /// When the document was processed.
    pub processed_at: DateTime<Local>,

    /// Non-fatal extraction diagnostics.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Per-file outcome inside a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Parsed(ParsedDocument),
    Failed { file: String, error: String },
}

impl BatchEntry {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Parsed(_) => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// Result of parsing a directory of documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Number of documents found.
    pub total_files: usize,

    /// One entry per document, in scan order.
    pub results: Vec<BatchEntry>,

    /// When the batch finished.
    pub processed_at: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_keys() {
        let record = ShipmentRecord {
            vendor_number: "123456".to_string(),
            purchase_order: "9988".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["template"], "Template-1");
        assert_eq!(json["vendor_no"], "123456");
        assert_eq!(json["po"], "9988");
        assert_eq!(json["del_date"], "");
        assert_eq!(json.as_object().unwrap().len(), 14);
    }

    #[test]
    fn test_template_defaults_to_one() {
        assert_eq!(TemplateKind::default(), TemplateKind::One);
        assert_eq!(ShipmentRecord::default().template, TemplateKind::One);
    }

    #[test]
    fn test_failed_entry_shape() {
        let entry = BatchEntry::Failed {
            file: "bad.pdf".to_string(),
            error: "PDF error".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["file"], "bad.pdf");
        assert_eq!(entry.error(), Some("PDF error"));
        assert!(!entry.is_parsed());
    }
}
