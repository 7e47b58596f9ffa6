//! Template-1: one document-level pickup/delivery date, Stop 1 to Stop 2.

use tracing::{debug, info};

use super::rules::patterns::{
    cut_before_markers, DELIVER_ON, PALLET_COUNT_FALLBACK, PICKUP_ON, TEMPLATE1_LINE_ITEM,
};
use super::rules::{extract_shipment_type, StopTable};
use super::{Extraction, ShipmentExtractor};
use crate::models::shipment::{ShipmentRecord, TemplateKind};

/// Extractor for the single-date layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Template1Extractor;

impl Template1Extractor {
    pub fn new() -> Self {
        Self
    }
}

impl ShipmentExtractor for Template1Extractor {
    fn extract(&self, text: &str, stops: &StopTable) -> Extraction {
        let pickup_date = PICKUP_ON
            .captures(text)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();
        let delivery_date = DELIVER_ON
            .captures(text)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();

        info!("Template-1: pickup_date={:?}, del_date={:?}", pickup_date, delivery_date);

        let ship_from = stops.origin().to_string();
        let ship_to = stops.stop(2).unwrap_or_default().to_string();

        let mut extraction = Extraction::default();

        for caps in TEMPLATE1_LINE_ITEM.captures_iter(text) {
            let purchase_order = caps[6].to_string();

            let mut description = caps
                .get(7)
                .map(|m| m.as_str().trim().trim_end_matches('|').trim().to_string())
                .unwrap_or_default();

            if description.is_empty() {
                description = description_near_po(text, &purchase_order);
                if !description.is_empty() {
                    debug!("Template-1: description from PO context: {:?}", description);
                }
            }

            let vendor_name = extraction.vendor_name(&caps[2]);

            extraction.records.push(ShipmentRecord {
                template: TemplateKind::One,
                pickup_date: pickup_date.clone(),
                delivery_date: delivery_date.clone(),
                ship_from: ship_from.clone(),
                ship_to: ship_to.clone(),
                vendor_number: caps[1].to_string(),
                vendor_name,
                cubes: caps[3].to_string(),
                weight: caps[4].to_string(),
                pieces: caps[5].to_string(),
                shipment_type: extract_shipment_type(text, &purchase_order),
                purchase_order,
                pallets: String::new(),
                description,
            });
        }

        info!("Template-1: extracted {} records", extraction.records.len());
        extraction
    }
}

/// First `Pallet Count:` text after the first occurrence of `po`, cut before a
/// pipe, line break, `Cube` or `Weight`.
fn description_near_po(text: &str, po: &str) -> String {
    let Some(pos) = text.find(po) else {
        return String::new();
    };

    PALLET_COUNT_FALLBACK
        .captures(&text[pos + po.len()..])
        .map(|caps| {
            let raw = &caps[1];
            raw[..cut_before_markers(raw, &["Cube", "Weight"], true)]
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_near_po() {
        let text = "ABC-PO-10-2025-9988 Ref Number: X Pallet Count:\n  Frozen Goods  | next";
        assert_eq!(description_near_po(text, "9988"), "Frozen Goods");
    }

    #[test]
    fn test_description_near_po_stops_at_cube() {
        let text = "PO 42 Pallet Count: Dry Mix Cube: 12";
        assert_eq!(description_near_po(text, "42"), "Dry Mix");
    }

    #[test]
    fn test_description_near_po_absent() {
        assert_eq!(description_near_po("no purchase order here", "42"), "");
        assert_eq!(description_near_po("Pallet Count: X then 42", "42"), "");
    }
}
