//! Layout detection.

use tracing::info;

use super::patterns::TEMPLATE2_MARKER;
use crate::models::shipment::TemplateKind;

/// Decide which layout the text follows.
///
/// A `Pickup: <Mon> <d>, <yyyy> <h>:<mm>:<ss>` marker means per-item dates
/// (Template-2); anything else is Template-1.
pub fn detect_template(text: &str) -> TemplateKind {
    if TEMPLATE2_MARKER.is_match(text) {
        info!("Detected Template 2 (multiple pickup/delivery dates per line item)");
        TemplateKind::Two
    } else {
        info!("Detected Template 1 (single pickup/delivery date)");
        TemplateKind::One
    }
}
