//! Batch processing command for a directory of documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use lading_core::{BatchEntry, BatchResult, DocumentParser, LadingConfig};

use super::process::{format_document, OutputFormat};
use super::{with_source, SourceArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory containing the documents
    #[arg(required = true)]
    directory: PathBuf,

    /// Glob applied inside the directory (default from config: *.pdf)
    #[arg(short, long)]
    pattern: Option<String>,

    /// Output directory for per-document results (default: print the batch as JSON)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each document
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Text-extraction source
    #[arg(long, value_enum)]
    source: Option<SourceArg>,
}

pub fn run(args: BatchArgs, config: LadingConfig) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = with_source(config, args.source);
    if let Some(pattern) = &args.pattern {
        config.input.document_pattern = pattern.clone();
    }

    let parser = DocumentParser::from_config(&config);
    let total = parser.find_documents(&args.directory)?.len();

    eprintln!("{} Found {} files to process", style("ℹ").blue(), total);

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let batch = parser.parse_batch_with(&args.directory, |path, _| {
        pb.set_message(path.display().to_string());
        pb.inc(1);
    })?;

    pb.finish_and_clear();

    match &args.output_dir {
        Some(output_dir) => write_outputs(&batch, output_dir, args.format)?,
        None => println!("{}", serde_json::to_string_pretty(&batch)?),
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &batch)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = batch.results.iter().filter(|r| !r.is_parsed()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        batch.total_files,
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(batch.total_files - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for entry in &failed {
            if let BatchEntry::Failed { file, error } = entry {
                eprintln!("  - {}: {}", file, error);
            }
        }
    }

    Ok(())
}

fn write_outputs(batch: &BatchResult, output_dir: &Path, format: OutputFormat) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)?;

    for entry in &batch.results {
        if let BatchEntry::Parsed(document) = entry {
            let stem = Path::new(&document.file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");

            let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));
            fs::write(&output_path, format_document(document, format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    Ok(())
}

fn write_summary(path: &Path, batch: &BatchResult) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "template", "records", "warnings", "error"])?;

    for entry in &batch.results {
        match entry {
            BatchEntry::Parsed(document) => {
                let records = document.records_count.to_string();
                let warnings = document.warnings.len().to_string();
                wtr.write_record([
                    document.file_name.as_str(),
                    "success",
                    document.template_type.as_str(),
                    records.as_str(),
                    warnings.as_str(),
                    "",
                ])?;
            }
            BatchEntry::Failed { file, error } => {
                let filename = Path::new(file)
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or(file.as_str());
                wtr.write_record([filename, "error", "", "", "", error.as_str()])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
