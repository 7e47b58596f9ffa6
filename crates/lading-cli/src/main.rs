//! CLI application for shipment tender extraction.

mod commands;

use std::path::Path;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use lading_core::LadingConfig;

use commands::{batch, config, invoke, process};

/// Extract shipment records from Template-1 and Template-2 tender documents
#[derive(Parser)]
#[command(name = "lading")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve one capability request read as JSON from stdin
    Invoke(invoke::InvokeArgs),

    /// Process a single document
    Process(process::ProcessArgs),

    /// Process every document in a directory
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `config init` must work before the file it names exists.
    let config = match cli.command {
        Commands::Config(_) => LadingConfig::default(),
        _ => load_config(cli.config.as_deref())?,
    };

    let level = match cli.verbose {
        0 => Level::from_str(&config.logging.level).unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout carries the command's output, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::with_default(subscriber, || match cli.command {
        Commands::Invoke(args) => invoke::run(args, config),
        Commands::Process(args) => process::run(args, config),
        Commands::Batch(args) => batch::run(args, config),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    })
}

/// Config from `--config`, else the default location, else built-in defaults.
fn load_config(path: Option<&str>) -> anyhow::Result<LadingConfig> {
    let config = match path {
        Some(path) => LadingConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e))?,
        None => LadingConfig::load_or_default(&commands::default_config_path())?,
    };
    Ok(config)
}
