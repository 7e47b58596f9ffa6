//! Shipment type lookup from `XXX-PO-NN-NNNN-<po> (TYPE)` annotations.

use regex::Regex;
use tracing::warn;

/// Find the parenthetical type next to `po_number` anywhere in `text`.
///
/// The first annotated occurrence wins; returns an empty string when absent.
pub fn extract_shipment_type(text: &str, po_number: &str) -> String {
    if po_number.is_empty() {
        return String::new();
    }

    let pattern = format!(
        r"(?i)[A-Z]{{3}}-PO-\d{{2}}-\d{{4}}-{}\s*\(([^)]+)\)",
        regex::escape(po_number)
    );

    match Regex::new(&pattern) {
        Ok(re) => re
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
            .unwrap_or_default(),
        Err(e) => {
            warn!("Invalid shipment type pattern for PO {}: {}", po_number, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_shipment_type() {
        let text = "Cube: 1 Weight: 2 Pieces: 3 AMS-PO-10-2025-4610227518 (GROC)";
        assert_eq!(extract_shipment_type(text, "4610227518"), "GROC");
    }

    #[test]
    fn test_case_and_spacing() {
        let text = "ams-po-10-2025-77   ( FRZ )";
        assert_eq!(extract_shipment_type(text, "77"), "FRZ");
    }

    #[test]
    fn test_missing_type() {
        assert_eq!(extract_shipment_type("AMS-PO-10-2025-77 Ref", "77"), "");
        assert_eq!(extract_shipment_type("AMS-PO-10-2025-770 (GROC)", "77"), "");
        assert_eq!(extract_shipment_type("anything", ""), "");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "ABC-PO-10-2025-5 (GROC) ... XYZ-PO-11-2025-5 (DAIRY)";
        assert_eq!(extract_shipment_type(text, "5"), "GROC");
    }
}
