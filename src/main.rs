use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sales_summary::{
    write_summary, CsvFileSource, OutputFormat, Pipeline, PipelineConfig, TableSource,
};

/// Summarize a CSV of sales transactions as JSON
#[derive(Parser)]
#[command(name = "sales-summary")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV with header date,region,product,units,price
    #[arg(default_value = "data.csv")]
    input: PathBuf,

    /// JSON file with pipeline settings (top_n, window_days)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of products to rank
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Rolling window length in calendar days
    #[arg(short, long)]
    window_days: Option<i64>,

    /// Write the summary to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Single-line JSON instead of indented
    #[arg(long)]
    compact: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    }
    .with_overrides(cli.top_n, cli.window_days);
    debug!(?config, "Pipeline configuration");

    let pipeline = Pipeline::new(config).context("Invalid pipeline configuration")?;

    let source = CsvFileSource::new(&cli.input);
    let summary = pipeline
        .run_source(&source)
        .with_context(|| format!("Failed to summarize {}", source.name()))?;

    let format = if cli.compact {
        OutputFormat::Compact
    } else {
        OutputFormat::Pretty
    };

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_summary(&summary, format, BufWriter::new(file))?;
            info!(output = %path.display(), "Summary written");
        }
        None => write_summary(&summary, format, io::stdout().lock())?,
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the JSON summary
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
