//! WASM bindings for shipment tender extraction.
//!
//! Exposes the text-level parser to browsers and Node.js; callers supply
//! text they extracted themselves, no file system access happens here.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use lading_core::shipment::rules;
use lading_core::{ShipmentParser, ShipmentRecord, TemplateKind, TemplateShipmentParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Serialize)]
struct ExtractOutput {
    template_type: TemplateKind,
    records_count: usize,
    records: Vec<ShipmentRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

fn extract_with(parser: &TemplateShipmentParser, text: &str) -> Result<JsValue, JsValue> {
    let result = parser.parse(text);

    let output = ExtractOutput {
        template_type: result.template,
        records_count: result.records.len(),
        records: result.records,
        warnings: result.warnings,
    };

    serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract shipment records from tender text.
///
/// Returns `{template_type, records_count, records, warnings?}`.
#[wasm_bindgen]
pub fn extract_shipments_from_text(text: &str) -> Result<JsValue, JsValue> {
    extract_with(&TemplateShipmentParser::new(), text)
}

/// Detected layout label, `"Template-1"` or `"Template-2"`.
#[wasm_bindgen]
pub fn detect_template(text: &str) -> String {
    rules::detect_template(text).as_str().to_string()
}

/// Convert `"Oct 20, 2025 11:59:00 PM"` to `"20/10/2025"`; other input is returned unchanged.
#[wasm_bindgen]
pub fn convert_date(date: &str) -> String {
    rules::convert_date(date)
}

/// Clean a raw vendor block down to the vendor name.
#[wasm_bindgen]
pub fn extract_vendor_name(full: &str) -> String {
    rules::extract_vendor_name(full)
}

/// Shipment extractor class for browser use.
#[wasm_bindgen]
pub struct ShipmentExtractor {
    parser: TemplateShipmentParser,
}

#[wasm_bindgen]
impl ShipmentExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: TemplateShipmentParser::new(),
        }
    }

    /// Toggle the Template-2 line item/date/description count check.
    #[wasm_bindgen]
    pub fn set_check_alignment(&mut self, check: bool) {
        self.parser = self.parser.clone().with_alignment_check(check);
    }

    /// Set the highest stop number accepted into the stop table.
    #[wasm_bindgen]
    pub fn set_max_stop_number(&mut self, max: usize) {
        self.parser = self.parser.clone().with_max_stop_number(max);
    }

    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        extract_with(&self.parser, text)
    }

    /// Records serialized as a JSON string.
    #[wasm_bindgen]
    pub fn extract_json(&self, text: &str) -> Result<String, JsValue> {
        let result = self.parser.parse(text);
        serde_json::to_string(&result.records).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for ShipmentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const TEMPLATE2: &str = "\
Stop: 1 Destination: 1, Mount Pearl DC Stop Location Memo:
Stop: 2 Destination: 24, TRA St. Johns Stop Location Memo:
237772 - Agropur Industrial Div - 24 - TRA St. Johns Cube: 1,200 Weight: 3,400 Pieces: 12 AMS-PO-10-2025-4610227518 (GROC)
Pallet Count: 12 Cheese
Pickup : Oct 20, 2025 11:59:00 PM
Delivery : Oct 22, 2025 8:00:00 AM
";

    #[wasm_bindgen_test]
    fn test_detect_template() {
        assert_eq!(detect_template(TEMPLATE2), "Template-2");
        assert_eq!(detect_template("Pickup On : 20/10/2025"), "Template-1");
    }

    #[wasm_bindgen_test]
    fn test_convert_date() {
        assert_eq!(convert_date("Oct 20, 2025 11:59:00 PM"), "20/10/2025");
        assert_eq!(convert_date("garbage"), "garbage");
    }

    #[wasm_bindgen_test]
    fn test_extract_vendor_name() {
        assert_eq!(
            extract_vendor_name("237772 - Agropur Industrial Div - 24 - TRA St. Johns"),
            "Agropur Industrial Div"
        );
    }

    #[wasm_bindgen_test]
    fn test_extract_json() {
        let json = ShipmentExtractor::new().extract_json(TEMPLATE2).unwrap();
        assert!(json.contains("\"po\":\"4610227518\""));
        assert!(json.contains("\"ship_to\":\"24, TRA St. Johns\""));
    }
}
