//! Batch processing command for multiple illustration files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::{stream, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use illus_core::{IllusConfig, IllustrationAssembler, IllustrationExtraction, IllustrationParser};

use super::config::load_config;
use super::input::{is_supported, read_document};
use super::parse::{build_parser, format_extraction, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<IllustrationExtraction>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = Arc::new(load_config(config_path)?);
    let parser = Arc::new(build_parser(&config)?);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Documents are independent; `buffered` keeps results in input order.
    let mut pending = stream::iter(files)
        .map(|path| {
            let config = Arc::clone(&config);
            let parser = Arc::clone(&parser);
            tokio::task::spawn_blocking(move || process_single_file(path, &config, &parser))
        })
        .buffered(args.jobs.max(1));

    let mut results = Vec::new();
    while let Some(joined) = pending.next().await {
        let result = joined?;

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                overall_pb.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push(result);
        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(extraction) = &result.extraction {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("illustration");

                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));
                let content = format_extraction(
                    extraction,
                    args.format,
                    false,
                    config.output.pretty_json,
                )?;

                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let unrecognized = successful
        .iter()
        .filter(|r| r.extraction.as_ref().is_some_and(|e| e.result.is_empty()))
        .count();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful ({} with no rows), {} failed",
        style(successful.len()).green(),
        style(unrecognized).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: PathBuf,
    config: &IllusConfig,
    parser: &IllustrationAssembler,
) -> ProcessResult {
    let file_start = Instant::now();

    let (extraction, error) = match read_document(&path, config) {
        Ok(text) => (Some(parser.parse_detailed(&text)), None),
        Err(e) => (None, Some(e.to_string())),
    };

    ProcessResult {
        path,
        extraction,
        error,
        processing_time_ms: file_start.elapsed().as_millis() as u64,
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "family",
        "rows",
        "final_age",
        "total_premium",
        "final_cash_value",
        "final_death_benefit",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(extraction) = &result.extraction {
            let last = extraction.result.last();
            let status = if extraction.result.is_empty() {
                "unrecognized"
            } else {
                "success"
            };

            wtr.write_record([
                filename,
                status,
                extraction.family.as_str(),
                &extraction.result.len().to_string(),
                &last.map(|p| p.age.to_string()).unwrap_or_default(),
                &extraction.result.total_premium().to_string(),
                &last.map(|p| p.net_cash_value.to_string()).unwrap_or_default(),
                &last.map(|p| p.net_death_benefit.to_string()).unwrap_or_default(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
