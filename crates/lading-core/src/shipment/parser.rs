//! Text-level orchestration: stop table, layout detection, extraction.

use tracing::{debug, info};

use super::rules::{detect_template, StopTable};
use super::{ShipmentExtractor, Template1Extractor, Template2Extractor};
use crate::models::config::ExtractionConfig;
use crate::models::shipment::{ShipmentRecord, TemplateKind};

/// Result of parsing one document's text.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Detected layout.
    pub template: TemplateKind,
    /// Extracted records in document order.
    pub records: Vec<ShipmentRecord>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for shipment text parsing.
pub trait ShipmentParser {
    /// Parse shipment records from raw document text. Never fails; degraded
    /// fields are reported as warnings.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser dispatching to the Template-1 or Template-2 extractor.
#[derive(Debug, Clone)]
pub struct TemplateShipmentParser {
    max_stop_number: usize,
    check_alignment: bool,
}

impl TemplateShipmentParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            max_stop_number: config.max_stop_number,
            check_alignment: config.check_alignment,
        }
    }

    /// Set the highest accepted stop number.
    pub fn with_max_stop_number(mut self, max: usize) -> Self {
        self.max_stop_number = max;
        self
    }

    /// Set the Template-2 alignment check.
    pub fn with_alignment_check(mut self, check: bool) -> Self {
        self.check_alignment = check;
        self
    }
}

impl Default for TemplateShipmentParser {
    fn default() -> Self {
        Self::new()
    }
}

// `Instant::now` panics on wasm32-unknown-unknown, so timing is native only.
#[cfg(not(target_arch = "wasm32"))]
fn stopwatch() -> Option<std::time::Instant> {
    Some(std::time::Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn stopwatch() -> Option<std::time::Instant> {
    None
}

fn elapsed_ms(start: Option<std::time::Instant>) -> u64 {
    start.map_or(0, |start| start.elapsed().as_millis() as u64)
}

impl ShipmentParser for TemplateShipmentParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = stopwatch();

        info!("Parsing shipment tender from {} characters of text", text.len());

        let stops = StopTable::from_text(text, self.max_stop_number);
        let template = detect_template(text);

        let extraction = match template {
            TemplateKind::One => Template1Extractor::new().extract(text, &stops),
            TemplateKind::Two => Template2Extractor::new()
                .with_alignment_check(self.check_alignment)
                .extract(text, &stops),
        };

        let mut warnings = stops.warnings().to_vec();
        warnings.extend(extraction.warnings);

        debug!(
            "Extracted {} {} records with {} warnings",
            extraction.records.len(),
            template,
            warnings.len()
        );

        ExtractionResult {
            template,
            records: extraction.records,
            warnings,
            processing_time_ms: elapsed_ms(start),
        }
    }
}
