//! Parse command - extract the yearly table from a single illustration.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use illus_core::{IllusConfig, IllustrationAssembler, IllustrationExtraction, IllustrationParser};

use super::config::load_config;
use super::input::read_document;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (PDF or extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include family, warnings and summary premium in JSON output
    #[arg(long)]
    detailed: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per age)
    Csv,
    /// Plain text table
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let parser = build_parser(&config)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading document...");
    let text = read_document(&args.input, &config)?;

    pb.set_message("Extracting illustration table...");
    let extraction = parser.parse_detailed(&text);
    pb.finish_and_clear();

    for warning in &extraction.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let pretty = args.pretty || config.output.pretty_json;
    let output = format_extraction(&extraction, args.format, args.detailed, pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render an extraction in the requested format.
pub fn format_extraction(
    extraction: &IllustrationExtraction,
    format: OutputFormat,
    detailed: bool,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(extraction, detailed, pretty),
        OutputFormat::Csv => format_csv(extraction),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_json(
    extraction: &IllustrationExtraction,
    detailed: bool,
    pretty: bool,
) -> anyhow::Result<String> {
    let json = match (detailed, pretty) {
        (true, true) => serde_json::to_string_pretty(extraction)?,
        (true, false) => serde_json::to_string(extraction)?,
        (false, true) => serde_json::to_string_pretty(&extraction.result)?,
        (false, false) => serde_json::to_string(&extraction.result)?,
    };
    Ok(json)
}

fn format_csv(extraction: &IllustrationExtraction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "age",
        "annual_premium",
        "cumulative_premium",
        "net_cash_value",
        "net_death_benefit",
    ])?;

    for point in &extraction.result.yearly_data {
        wtr.write_record([
            point.age.to_string(),
            point.annual_premium.to_string(),
            point.cumulative_premium.to_string(),
            point.net_cash_value.to_string(),
            point.net_death_benefit.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(extraction: &IllustrationExtraction) -> String {
    let mut output = String::new();
    let result = &extraction.result;

    output.push_str(&format!("Policy family: {}\n", extraction.family));
    if let Some(premium) = extraction.stated_annual_premium {
        output.push_str(&format!("Stated annual premium: {}\n", premium));
    }
    output.push_str(&format!("Rows: {}\n", result.len()));

    if result.is_empty() {
        output.push_str("\nNo illustration rows found.\n");
        return output;
    }

    output.push('\n');
    output.push_str(&format!(
        "{:>4}  {:>12}  {:>14}  {:>14}  {:>14}\n",
        "Age", "Premium", "Cumulative", "Cash Value", "Death Benefit"
    ));
    for point in &result.yearly_data {
        output.push_str(&format!(
            "{:>4}  {:>12}  {:>14}  {:>14}  {:>14}\n",
            point.age,
            point.annual_premium,
            point.cumulative_premium,
            point.net_cash_value,
            point.net_death_benefit
        ));
    }

    output.push_str(&format!("\nTotal premium: {}\n", result.total_premium()));
    output
}

/// Build the illustration parser from loaded configuration.
pub fn build_parser(config: &IllusConfig) -> anyhow::Result<IllustrationAssembler> {
    Ok(IllustrationAssembler::from_config(&config.parser)?)
}
