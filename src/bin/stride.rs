//! Stride CLI - Command-line interface for Stride Flux
//!
//! Commands:
//! - sample: Compute the built-in sample sessions
//! - calc: Compute a single package given on the command line

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stride_flux::formatter::{
    FormatOptions, InfoMessage, SummaryEncoder, WorkoutSummary, DEFAULT_PRECISION,
};
use stride_flux::package::{sample_packages, SensorPackage};
use stride_flux::pipeline::WorkoutProcessor;
use stride_flux::types::WorkoutResult;
use stride_flux::STRIDE_VERSION;

/// Stride - Workout calculator for raw tracker readings
#[derive(Parser)]
#[command(name = "stride")]
#[command(author = "Synheart AI Inc")]
#[command(version = STRIDE_VERSION)]
#[command(about = "Compute distance, speed and calories from workout packages", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Decimal places in reported numbers (at most 15)
    #[arg(long, global = true, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the built-in sample sessions (default)
    Sample {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Compute a single package
    Calc {
        /// Workout code (SWM, RUN, WLK)
        code: String,

        /// Readings in workout order, e.g. 15000 1 75
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One summary line per workout
    Text,
    /// Newline-delimited JSON (one summary per line)
    Ndjson,
    /// JSON array of summaries
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::new(format!("stride_flux={level},stride={level}"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), StrideCliError> {
    let options = FormatOptions::new(cli.global.precision)?;

    match cli.command.unwrap_or(Commands::Sample {
        format: OutputFormat::Text,
    }) {
        Commands::Sample { format } => cmd_sample(options, format),

        Commands::Calc {
            code,
            values,
            format,
        } => cmd_calc(options, code, values, format),
    }
}

fn cmd_sample(options: FormatOptions, format: OutputFormat) -> Result<(), StrideCliError> {
    let mut processor = WorkoutProcessor::with_options(options);
    let results = process_all(&mut processor, &sample_packages())?;

    let tally = processor.tally();
    info!(
        processed = tally.total_processed(),
        rejected = tally.rejected,
        "sample sessions computed"
    );

    print!("{}", format_output(&processor, &results, &format)?);
    Ok(())
}

fn cmd_calc(
    options: FormatOptions,
    code: String,
    values: Vec<f64>,
    format: OutputFormat,
) -> Result<(), StrideCliError> {
    let mut processor = WorkoutProcessor::with_options(options);
    let result = processor.process(&SensorPackage::new(code, values))?;
    print!("{}", format_output(&processor, &[result], &format)?);
    Ok(())
}

// Helper functions

fn process_all(
    processor: &mut WorkoutProcessor,
    packages: &[SensorPackage],
) -> Result<Vec<WorkoutResult>, StrideCliError> {
    let mut results = Vec::with_capacity(packages.len());
    for package in packages {
        results.push(processor.process(package)?);
    }
    Ok(results)
}

fn format_output(
    processor: &WorkoutProcessor,
    results: &[WorkoutResult],
    format: &OutputFormat,
) -> Result<String, StrideCliError> {
    let encoder = processor.encoder();

    match format {
        OutputFormat::Text => {
            let mut lines = String::new();
            for result in results {
                lines.push_str(&InfoMessage::from(result).render(processor.options()));
                lines.push('\n');
            }
            Ok(lines)
        }
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for result in results {
                lines.push(encoder.encode_to_json(result)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => {
            let summaries = encode_all(encoder, results)?;
            Ok(serde_json::to_string(&summaries)? + "\n")
        }
        OutputFormat::JsonPretty => {
            let summaries = encode_all(encoder, results)?;
            Ok(serde_json::to_string_pretty(&summaries)? + "\n")
        }
    }
}

fn encode_all(
    encoder: &SummaryEncoder,
    results: &[WorkoutResult],
) -> Result<Vec<WorkoutSummary>, StrideCliError> {
    let mut summaries = Vec::with_capacity(results.len());
    for result in results {
        summaries.push(encoder.encode(result)?);
    }
    Ok(summaries)
}

// Error types

#[derive(Debug)]
enum StrideCliError {
    Compute(stride_flux::ComputeError),
    Json(serde_json::Error),
}

impl From<stride_flux::ComputeError> for StrideCliError {
    fn from(e: stride_flux::ComputeError) -> Self {
        StrideCliError::Compute(e)
    }
}

impl From<serde_json::Error> for StrideCliError {
    fn from(e: serde_json::Error) -> Self {
        StrideCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<StrideCliError> for CliError {
    fn from(e: StrideCliError) -> Self {
        use stride_flux::ComputeError;

        match e {
            StrideCliError::Compute(e) => {
                let (code, hint) = match &e {
                    ComputeError::InvalidWorkoutType(_) => {
                        ("INVALID_WORKOUT_TYPE", "Use one of SWM, RUN, WLK")
                    }
                    ComputeError::MissingParameter { .. }
                    | ComputeError::UnexpectedParameters { .. } => (
                        "PARAMETER_COUNT",
                        "RUN takes 3 readings, WLK 4 and SWM 5",
                    ),
                    ComputeError::InvalidParameterValue {
                        name: "precision", ..
                    } => ("INVALID_PRECISION", "Use a --precision between 0 and 15"),
                    ComputeError::InvalidParameterValue { .. } => {
                        ("INVALID_PARAMETER_VALUE", "Check units and ranges of the readings")
                    }
                    ComputeError::ParseError(_) | ComputeError::JsonError(_) => {
                        ("PARSE_ERROR", "Ensure input matches the package format")
                    }
                    ComputeError::EncodingError(_) => {
                        ("ENCODING_ERROR", "Try a smaller --precision")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            StrideCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
        }
    }
}
