use std::fs;
use std::path::Path;

use lading_core::{
    BatchEntry, CapabilityPayload, CapabilityRequest, DocumentParser, ExtractionError,
    LadingError, PlainTextSource, TemplateKind,
};

const TENDER: &str = "\
Pickup On : 20/10/2025
Deliver On : 22/10/2025
Stop: 1 Destination: Warehouse A Stop Location Memo:
Stop: 2 Destination: Store B Stop Location Memo:
123456 - Acme Corp Cube: 1,200 Weight: 3,400 Pieces: 12 ABC-PO-10-2025-9988 (GROC) Ref Number: X Pallet Count: Frozen Goods|
";

fn request(json: &str) -> CapabilityRequest {
    serde_json::from_str(json).unwrap()
}

#[test]
fn parse_reads_through_text_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tender.pdf");
    fs::write(&path, TENDER).unwrap();

    let parser = DocumentParser::new(PlainTextSource);
    let document = parser.parse(&path).unwrap();

    assert_eq!(document.template_type, TemplateKind::One);
    assert_eq!(document.records_count, 1);
    assert_eq!(document.records.len(), 1);
    assert_eq!(document.file_name, "tender.pdf");
    assert_eq!(document.records[0].shipment_type, "GROC");
}

#[test]
fn parse_missing_document_is_not_found() {
    let parser = DocumentParser::new(PlainTextSource);
    let err = parser.parse(Path::new("/nonexistent/lading/tender.pdf")).unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn parse_surfaces_source_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tender.pdf");
    fs::write(&path, "ignored").unwrap();

    let parser = DocumentParser::new(|_: &Path| -> Result<String, ExtractionError> {
        Err(ExtractionError::Panicked("font table".to_string()))
    });
    let err = parser.parse(&path).unwrap_err();

    assert!(matches!(err, LadingError::Extraction(_)));
    assert!(!err.is_not_found());
}

#[test]
fn batch_continues_past_corrupt_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a_valid.pdf"), TENDER).unwrap();
    fs::write(dir.path().join("b_corrupt.pdf"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a document").unwrap();

    let parser = DocumentParser::new(PlainTextSource);
    let batch = parser.parse_batch(dir.path()).unwrap();

    assert_eq!(batch.total_files, 2);
    assert_eq!(batch.results.len(), 2);

    match &batch.results[0] {
        BatchEntry::Parsed(document) => {
            assert_eq!(document.file_name, "a_valid.pdf");
            assert_eq!(document.records_count, 1);
        }
        other => panic!("expected parsed entry, got {:?}", other),
    }

    match &batch.results[1] {
        BatchEntry::Failed { file, error } => {
            assert!(file.ends_with("b_corrupt.pdf"));
            assert!(error.contains("failed to decode"));
        }
        other => panic!("expected failed entry, got {:?}", other),
    }
}

#[test]
fn batch_honors_document_pattern() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one.txt"), TENDER).unwrap();
    fs::write(dir.path().join("two.pdf"), TENDER).unwrap();

    let parser = DocumentParser::new(PlainTextSource).with_document_pattern("*.txt");
    let batch = parser.parse_batch(dir.path()).unwrap();

    assert_eq!(batch.total_files, 1);
    assert!(batch.results[0].is_parsed());
}

#[test]
fn batch_errors_on_missing_or_empty_directory() {
    let parser = DocumentParser::new(PlainTextSource);

    let missing = parser.parse_batch(Path::new("/nonexistent/lading")).unwrap_err();
    assert!(matches!(missing, LadingError::DirectoryNotFound(_)));

    let dir = tempfile::tempdir().unwrap();
    let empty = parser.parse_batch(dir.path()).unwrap_err();
    assert!(matches!(empty, LadingError::NoDocuments(_)));
    assert!(empty.is_not_found());
}

#[test]
fn handle_parse_pdf_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tender.pdf");
    fs::write(&path, TENDER).unwrap();

    let parser = DocumentParser::new(PlainTextSource);
    let json = serde_json::json!({
        "capability": "parse_pdf",
        "args": { "pdf_path": path.to_string_lossy() }
    });
    let response = parser.handle(&serde_json::from_value(json).unwrap());

    assert!(response.is_success());
    assert_eq!(response.capability, "parse_pdf");
    match response.result() {
        Some(CapabilityPayload::Document(document)) => assert_eq!(document.records_count, 1),
        other => panic!("expected document payload, got {:?}", other),
    }

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["result"]["template_type"], "Template-1");
    assert_eq!(value["result"]["records"][0]["vendor_no"], "123456");
}

#[test]
fn handle_reports_errors_in_envelope() {
    let parser = DocumentParser::new(PlainTextSource);

    let missing_arg = parser.handle(&request(r#"{"capability": "parse_pdf", "args": {}}"#));
    assert_eq!(missing_arg.error(), Some("Missing required parameter: pdf_path"));

    let missing_dir = parser.handle(&request(
        r#"{"capability": "parse_directory", "args": {"directory_path": "/nonexistent/lading"}}"#,
    ));
    assert_eq!(missing_dir.capability, "parse_directory");
    assert_eq!(missing_dir.error(), Some("Directory not found: /nonexistent/lading"));

    let unknown = parser.handle(&request(r#"{"capability": "render", "args": {}}"#));
    assert_eq!(unknown.error(), Some("Unknown capability: render"));
    assert_eq!(unknown.capability, "render");
    assert!(unknown.result().is_none());
}

#[test]
fn handle_non_string_capability_is_unknown() {
    let parser = DocumentParser::new(PlainTextSource);

    let numeric = parser.handle(&request(r#"{"capability": 5, "args": {}}"#));
    assert_eq!(numeric.error(), Some("Unknown capability: 5"));
    assert_eq!(numeric.capability, "5");
}
