//! Compare command - parse two illustrations and align them by age.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::{debug, info};

use illus_core::illustration::AgeValues;
use illus_core::{
    compare, Comparison, IllusConfig, IllustrationAssembler, IllustrationExtraction,
    IllustrationParser,
};

use super::config::load_config;
use super::input::read_document;
use super::parse::{build_parser, OutputFormat};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// First illustration (PDF or extracted text)
    #[arg(required = true)]
    left: PathBuf,

    /// Second illustration (PDF or extracted text)
    #[arg(required = true)]
    right: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = Arc::new(load_config(config_path)?);
    let parser = Arc::new(build_parser(&config)?);

    info!(
        "Comparing {} with {}",
        args.left.display(),
        args.right.display()
    );

    // The two documents share nothing, so parse them side by side.
    let left = spawn_parse(args.left.clone(), Arc::clone(&config), Arc::clone(&parser));
    let right = spawn_parse(args.right.clone(), Arc::clone(&config), Arc::clone(&parser));
    let (left, right) = tokio::try_join!(left, right)?;
    let (left, right) = (left?, right?);

    for (path, extraction) in [(&args.left, &left), (&args.right, &right)] {
        for warning in &extraction.warnings {
            eprintln!("{} {}: {}", style("!").yellow(), path.display(), warning);
        }
    }

    let comparison = compare(&left.result, &right.result);
    debug!("Aligned {} ages", comparison.rows.len());

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string(&comparison)?,
        OutputFormat::Csv => format_csv(&comparison)?,
        OutputFormat::Text => format_text(&comparison, &left, &right),
    };

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

    Ok(())
}

fn spawn_parse(
    path: PathBuf,
    config: Arc<IllusConfig>,
    parser: Arc<IllustrationAssembler>,
) -> tokio::task::JoinHandle<anyhow::Result<IllustrationExtraction>> {
    tokio::task::spawn_blocking(move || {
        let text = read_document(&path, &config)?;
        Ok(parser.parse_detailed(&text))
    })
}

const SIDE_COLUMNS: [&str; 5] = [
    "cumulative_premium",
    "net_cash_value",
    "net_death_benefit",
    "annual_premium",
    "cash_value_growth",
];

fn side_fields(values: Option<&AgeValues>) -> [String; 5] {
    match values {
        Some(v) => [
            v.cumulative_premium.to_string(),
            v.net_cash_value.to_string(),
            v.net_death_benefit.to_string(),
            v.annual_premium.to_string(),
            v.cash_value_growth.to_string(),
        ],
        None => Default::default(),
    }
}

fn format_csv(comparison: &Comparison) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["age".to_string()];
    for side in ["left", "right"] {
        header.extend(SIDE_COLUMNS.iter().map(|c| format!("{}_{}", side, c)));
    }
    wtr.write_record(&header)?;

    for row in &comparison.rows {
        let mut record = vec![row.age.to_string()];
        record.extend(side_fields(row.left.as_ref()));
        record.extend(side_fields(row.right.as_ref()));
        wtr.write_record(&record)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(
    comparison: &Comparison,
    left: &IllustrationExtraction,
    right: &IllustrationExtraction,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Left:  {} ({} rows, total premium {})\n",
        left.family,
        left.result.len(),
        left.result.total_premium()
    ));
    output.push_str(&format!(
        "Right: {} ({} rows, total premium {})\n\n",
        right.family,
        right.result.len(),
        right.result.total_premium()
    ));

    output.push_str(&format!(
        "{:>4}  {:>14}  {:>12}  {:>14}  {:>12}\n",
        "Age", "L Premium", "L Cash", "R Premium", "R Cash"
    ));

    for row in &comparison.rows {
        let (lp, lc) = cells(row.left.as_ref());
        let (rp, rc) = cells(row.right.as_ref());
        output.push_str(&format!(
            "{:>4}  {:>14}  {:>12}  {:>14}  {:>12}\n",
            row.age, lp, lc, rp, rc
        ));
    }

    output
}

fn cells(values: Option<&AgeValues>) -> (String, String) {
    values
        .map(|v| (v.cumulative_premium.to_string(), v.net_cash_value.to_string()))
        .unwrap_or_else(|| ("-".to_string(), "-".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_csv_blank_for_missing_side() {
        let parser = IllustrationAssembler::new();
        let left = parser.parse("Accelerator 20\nPolicy Detail\n1 45 100.00 100,000\n");
        let right = parser.parse("Accelerator 20\nPolicy Detail\n1 46 200.00 100,000\n");

        let csv = format_csv(&compare(&left, &right)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("age,left_cumulative_premium,"));
        assert_eq!(lines[1], "45,100.00,0,100000,100.00,0,,,,,");
        assert_eq!(lines[2], "46,,,,,,200.00,0,100000,200.00,0");
    }
}
