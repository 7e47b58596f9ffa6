//! Process command - extract shipment records from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use lading_core::{DocumentParser, LadingConfig, ParsedDocument, ShipmentRecord};

use super::{with_source, SourceArg};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input document
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Text-extraction source
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Print extraction warnings to stderr
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Full document payload as JSON
    Json,
    /// One CSV row per shipment record
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

pub fn run(args: ProcessArgs, config: LadingConfig) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = with_source(config, args.source);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let parser = DocumentParser::from_config(&config);
    let document = parser.parse(&args.input)?;

    if args.show_warnings && !document.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &document.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_document(&document, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            document.records_count,
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_document(document: &ParsedDocument, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        OutputFormat::Csv => format_csv(&document.records),
    }
}

fn format_csv(records: &[ShipmentRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Field names come from the record's serde renames.
    for record in records {
        wtr.serialize(record)?;
    }
    if records.is_empty() {
        wtr.write_record(CSV_HEADER)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

const CSV_HEADER: [&str; 14] = [
    "template",
    "pickup_date",
    "del_date",
    "ship_from",
    "ship_to",
    "vendor_no",
    "vendor_name",
    "cubes",
    "weight",
    "pieces",
    "po",
    "shipment_type",
    "pallets",
    "description",
];

#[cfg(test)]
mod tests {
    use super::*;
    use lading_core::TemplateKind;

    fn record(po: &str) -> ShipmentRecord {
        ShipmentRecord {
            template: TemplateKind::One,
            purchase_order: po.to_string(),
            vendor_name: "ACME, FOODS".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let csv = format_csv(&[record("111"), record("222")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert!(lines[1].contains("\"ACME, FOODS\""));
        assert!(lines[2].contains(",222,"));
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let csv = format_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), CSV_HEADER.join(","));
    }
}
