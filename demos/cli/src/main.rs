use std::path::PathBuf;

use anyhow::Context;
use bloodreport_core::{AnalysisConfig, BloodReport, CoercionMode};
use bloodreport_intake::analyze_submission_str;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bloodreport-cli",
    about = "Generate a blood test report from a JSON form submission."
)]
struct Args {
    /// Path to the JSON submission file.
    #[arg(short, long)]
    input: PathBuf,

    /// Reject blank or unparseable measurements instead of reading them as 0.
    #[arg(long)]
    strict: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log filter (e.g. `debug`, `bloodreport_intake=debug`).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level).context("Invalid log filter")?)
        .with_writer(std::io::stderr)
        .init();

    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Could not read file {:?}", args.input))?;

    let config = AnalysisConfig {
        coercion: if args.strict {
            CoercionMode::Strict
        } else {
            CoercionMode::Lenient
        },
        ..AnalysisConfig::default()
    };
    info!(input = ?args.input, coercion = ?config.coercion, "analyzing submission");

    let report = analyze_submission_str(&data, &config)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }

    Ok(())
}

fn print_report(report: &BloodReport) {
    let patient = &report.patient;
    println!(
        "Patient: {} ({} years, {})\nTest date: {}\nGenerated at: {}\n",
        patient.name,
        patient.age,
        patient.gender.label(),
        patient
            .test_date
            .map_or_else(|| "Invalid Date".to_string(), |date| date.to_string()),
        report.generated_at
    );

    for result in &report.results {
        println!(
            "{:<12} {:>10} {:<11} {:<7} Normal: {:<16} {}",
            result.label,
            result.value,
            result.unit,
            format!("{:?}", result.status).to_uppercase(),
            result.normal_range,
            result.interpretation
        );
    }

    if report.needs_attention() {
        println!(
            "\nAttention Required: {} parameter(s) outside normal range.",
            report.abnormal_count
        );
    }

    println!("\nRecommendations:");
    for recommendation in &report.recommendations {
        println!("  - {recommendation}");
    }
    println!("\nDisclaimer: {}", report.disclaimer);
}
