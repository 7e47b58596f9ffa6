//! Template-2: per-item pickup/delivery date-times, ship-to resolved per item.
//!
//! Line items, dates and descriptions are scanned independently and paired
//! by position: the i-th line item gets the i-th pickup date, delivery date
//! and description. Nothing ties them together by content, so a scan that
//! misses or adds an entry shifts every later pairing. Counts are compared
//! and a mismatch is reported as a warning; pairing still proceeds.

use tracing::{debug, info};

use super::rules::patterns::{
    cut_before_markers, DELIVERY_DATETIME, PALLET_COUNT, PICKUP_DATETIME, TEMPLATE2_LINE_ITEM,
    VENDOR_STOP_SEGMENT,
};
use super::rules::{collapse_whitespace, extract_shipment_type, try_convert_date, StopTable};
use super::{Extraction, ShipmentExtractor};
use crate::models::shipment::{ShipmentRecord, LEGACY_TEMPLATE2_RECORD_TAG};

/// A captured line item before pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineItem {
    vendor_number: String,
    /// Vendor block with whitespace collapsed, route segment still attached.
    vendor_block: String,
    cubes: String,
    weight: String,
    pieces: String,
    purchase_order: String,
}

/// Extractor for the per-item date layout.
#[derive(Debug, Clone, Copy)]
pub struct Template2Extractor {
    check_alignment: bool,
}

impl Template2Extractor {
    pub fn new() -> Self {
        Self { check_alignment: true }
    }

    /// Enable the equal-count check between items, dates and descriptions.
    pub fn with_alignment_check(mut self, check: bool) -> Self {
        self.check_alignment = check;
        self
    }
}

impl Default for Template2Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipmentExtractor for Template2Extractor {
    fn extract(&self, text: &str, stops: &StopTable) -> Extraction {
        let mut extraction = Extraction::default();

        let items = line_items(text);
        let descriptions = pallet_descriptions(text);
        let pickups: Vec<String> = PICKUP_DATETIME
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect();
        let deliveries: Vec<String> = DELIVERY_DATETIME
            .captures_iter(text)
            .map(|caps| collapse_whitespace(&caps[1]))
            .collect();

        info!(
            "Template-2: {} line items, {} pickup dates, {} delivery dates, {} descriptions",
            items.len(),
            pickups.len(),
            deliveries.len(),
            descriptions.len()
        );

        if self.check_alignment {
            let counts = [
                ("pickup dates", pickups.len()),
                ("delivery dates", deliveries.len()),
                ("descriptions", descriptions.len()),
            ];
            for (what, count) in counts {
                if count != items.len() {
                    extraction.push_warning(format!(
                        "Found {} {} for {} line items; pairing by position is best-effort",
                        count,
                        what,
                        items.len()
                    ));
                }
            }
        }

        let ship_from = stops.origin().to_string();

        for (idx, item) in items.into_iter().enumerate() {
            let pickup_date = pickups
                .get(idx)
                .map(|d| extraction.format_date(d))
                .unwrap_or_default();
            let delivery_date = deliveries
                .get(idx)
                .map(|d| extraction.format_date(d))
                .unwrap_or_default();

            let ship_to = extraction.resolve_ship_to(&item.vendor_block, stops);
            let vendor_name = extraction.vendor_name(&item.vendor_block);
            debug!(
                "Line item {}: vendor block {:?} -> {:?}",
                idx, item.vendor_block, vendor_name
            );

            extraction.records.push(ShipmentRecord {
                template: LEGACY_TEMPLATE2_RECORD_TAG,
                pickup_date,
                delivery_date,
                ship_from: ship_from.clone(),
                ship_to,
                vendor_number: item.vendor_number,
                vendor_name,
                cubes: item.cubes,
                weight: item.weight,
                pieces: item.pieces,
                shipment_type: extract_shipment_type(text, &item.purchase_order),
                purchase_order: item.purchase_order,
                pallets: String::new(),
                description: descriptions.get(idx).cloned().unwrap_or_default(),
            });
        }

        extraction
    }
}

impl Extraction {
    fn format_date(&mut self, date: &str) -> String {
        match try_convert_date(date) {
            Ok(converted) => converted,
            Err(e) => {
                self.push_warning(format!("Error converting date format: {:?}, {}", date, e));
                date.to_string()
            }
        }
    }

    /// Ship-to from the `- <stop> - <location>` segment of the vendor block.
    fn resolve_ship_to(&mut self, vendor_block: &str, stops: &StopTable) -> String {
        let Some(caps) = VENDOR_STOP_SEGMENT.captures(vendor_block) else {
            self.push_warning(format!(
                "Could not extract stop number from vendor name: {:?}",
                vendor_block
            ));
            return String::new();
        };

        let stop_number = caps[1].trim();
        match stops.find_by_leading_number(stop_number) {
            Some(destination) => {
                debug!("Matched vendor stop {:?} with destination {:?}", stop_number, destination);
                destination.to_string()
            }
            None => {
                self.push_warning(format!(
                    "No matching destination found for stop number: {}",
                    stop_number
                ));
                String::new()
            }
        }
    }
}

fn line_items(text: &str) -> Vec<LineItem> {
    TEMPLATE2_LINE_ITEM
        .captures_iter(text)
        .map(|caps| LineItem {
            vendor_number: caps[1].to_string(),
            vendor_block: collapse_whitespace(&caps[2]),
            cubes: caps[3].to_string(),
            weight: caps[4].to_string(),
            pieces: caps[5].to_string(),
            purchase_order: caps[7].to_string(),
        })
        .collect()
}

/// Non-empty `Pallet Count:` texts, each cut before the next Pickup/Delivery marker.
fn pallet_descriptions(text: &str) -> Vec<String> {
    let mut descriptions = Vec::new();
    let mut pos = 0;

    while let Some(caps) = PALLET_COUNT.captures_at(text, pos) {
        let Some(capture) = caps.get(1) else { break };
        let raw = capture.as_str();
        let end = cut_before_markers(raw, &["Pickup", "Delivery"], false);

        let description = raw[..end].trim();
        if !description.is_empty() {
            descriptions.push(description.to_string());
        }
        pos = capture.start() + end;
    }

    descriptions
}
