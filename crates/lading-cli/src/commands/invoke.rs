//! Invoke command - serve one JSON capability request from stdin.
//!
//! The full reply is written to a side file; stdout gets only
//! `{"capability": ..., "saved_to": ...}`.

use std::fs;
use std::io::{self, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;
use serde_json::{json, Value};
use tracing::{debug, error};

use lading_core::{
    panic_message, Capability, CapabilityRequest, CapabilityResponse, DocumentParser,
    LadingConfig, UNKNOWN_CAPABILITY,
};

use super::{default_output_dir, with_source, SourceArg};

const MAX_STEM_CHARS: usize = 50;

/// Arguments for the invoke command.
#[derive(Args)]
pub struct InvokeArgs {
    /// Directory for result files (default: Downloads)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Text-extraction source
    #[arg(long, value_enum)]
    source: Option<SourceArg>,
}

pub fn run(args: InvokeArgs, config: LadingConfig) -> anyhow::Result<()> {
    let config = with_source(config, args.source);
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| default_output_dir(&config));
    let prefix = config.output.file_prefix.as_str();

    let request = match read_request(io::stdin()) {
        Ok(request) => request,
        Err(e) => {
            error!("Invalid request: {}", e);
            let response = CapabilityResponse::failure(UNKNOWN_CAPABILITY, e.to_string());
            let saved = save_response(&response, None, &output_dir, prefix)?;
            print_reply(UNKNOWN_CAPABILITY, &saved)?;
            anyhow::bail!("Invalid request: {}", e);
        }
    };

    let parser = DocumentParser::from_config(&config);
    let response = panic::catch_unwind(AssertUnwindSafe(|| parser.handle(&request)))
        .unwrap_or_else(|payload| {
            let capability = request
                .capability
                .clone()
                .unwrap_or_else(|| UNKNOWN_CAPABILITY.to_string());
            let message = format!("Unexpected error: {}", panic_message(payload.as_ref()));
            CapabilityResponse::failure(capability, message)
        });

    let capability = request.capability.as_deref().and_then(Capability::from_name);
    let Some(capability) = capability else {
        // Unknown capabilities are answered inline, nothing is saved.
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    };

    let source_name = match capability {
        Capability::ParsePdf if response.is_success() => request.arg("pdf_path"),
        _ => None,
    };
    let saved = save_response(&response, source_name, &output_dir, prefix)?;
    print_reply(&response.capability, &saved)
}

fn read_request(mut input: impl Read) -> anyhow::Result<CapabilityRequest> {
    let mut buffer = String::new();
    input.read_to_string(&mut buffer)?;
    Ok(serde_json::from_str(&buffer)?)
}

fn print_reply(capability: &str, saved_to: &Path) -> anyhow::Result<()> {
    let reply = json!({
        "capability": capability,
        "saved_to": saved_to.display().to_string(),
    });
    println!("{}", serde_json::to_string(&reply)?);
    Ok(())
}

/// Write the reply envelope plus `saved_to` as pretty JSON.
fn save_response(
    response: &CapabilityResponse,
    source_name: Option<&str>,
    output_dir: &Path,
    prefix: &str,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let file_name = match source_name {
        Some(source) => format!("{}_{}_{}.txt", prefix, sanitize_stem(source), timestamp),
        None => format!("{}_result_{}.txt", prefix, timestamp),
    };
    let path = output_dir.join(file_name);

    let mut envelope = serde_json::to_value(response)?;
    if let Value::Object(fields) = &mut envelope {
        fields.insert("saved_to".to_string(), json!(path.display().to_string()));
    }
    fs::write(&path, serde_json::to_string_pretty(&envelope)?)?;

    debug!("Saved result to {}", path.display());
    Ok(path)
}

/// File stem of `source` with unsafe characters replaced by `_`.
fn sanitize_stem(source: &str) -> String {
    let stem = Path::new(source)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    stem.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_STEM_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_stem() {
        assert_eq!(sanitize_stem("/tmp/tender 42 (final).pdf"), "tender_42__final_");
        assert_eq!(sanitize_stem("report-v1.2.pdf"), "report-v1.2");
        assert_eq!(sanitize_stem("Lieferschein_Müller.pdf"), "Lieferschein_Müller");
    }

    #[test]
    fn test_sanitize_stem_truncates() {
        let long = format!("{}.pdf", "a".repeat(80));
        assert_eq!(sanitize_stem(&long).chars().count(), MAX_STEM_CHARS);
    }

    #[test]
    fn test_read_request() {
        let request =
            read_request(r#"{"capability": "parse_pdf", "args": {"pdf_path": "a.pdf"}}"#.as_bytes())
                .unwrap();
        assert_eq!(request.capability.as_deref(), Some("parse_pdf"));
        assert_eq!(request.arg("pdf_path"), Some("a.pdf"));

        assert!(read_request("not json".as_bytes()).is_err());

        let request = read_request(r#"{"capability": 5}"#.as_bytes()).unwrap();
        assert_eq!(request.capability.as_deref(), Some("5"));
    }

    #[test]
    fn test_save_response_adds_saved_to() {
        let dir = tempfile::tempdir().unwrap();
        let response = CapabilityResponse::failure("parse_pdf", "boom");

        let path = save_response(&response, None, dir.path(), "shipment_parser").unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("shipment_parser_result_"));
        assert!(name.ends_with(".txt"));

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["error"], "boom");
        assert_eq!(saved["capability"], "parse_pdf");
        assert_eq!(saved["saved_to"], path.display().to_string());
    }
}
