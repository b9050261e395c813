//! Heatmap CLI - Command-line interface for the weekday heatmap
//!
//! Commands:
//! - render: Build the chart payload (or a text grid) from records
//! - stats: Print per-weekday sums and averages
//! - validate: Validate record input
//! - seed: Print the compiled-in records in input format

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use weekday_heatmap::config::ChartConfig;
use weekday_heatmap::encoder::ChartEncoder;
use weekday_heatmap::render::TableRenderer;
use weekday_heatmap::schema::{RawRecord, RawRecordAdapter};
use weekday_heatmap::store::RecordStore;
use weekday_heatmap::types::WeekdayRecord;
use weekday_heatmap::{build_heatmap, compute_statistics, HEATMAP_VERSION};

/// Heatmap - weekday sales statistics for heatmap charts
#[derive(Parser)]
#[command(name = "heatmap")]
#[command(version = HEATMAP_VERSION)]
#[command(about = "Build heatmap chart data from weekday sales records", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the chart payload or a text grid
    Render {
        /// Input file path (use - for stdin); the built-in records are used when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format (defaults to table on a terminal, pretty JSON otherwise)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Chart configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the chart title
        #[arg(long)]
        title: Option<String>,

        /// Leave out the Average and Total rows
        #[arg(long)]
        no_aggregates: bool,
    },

    /// Print per-weekday sums and averages
    Stats {
        /// Input file path (use - for stdin); the built-in records are used when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Chart configuration file (TOML); sets the printed average precision
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate record input
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in records in input format
    Seed {
        /// One record per line instead of a JSON array
        #[arg(long)]
        ndjson: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of records
    Json,
    /// Newline-delimited JSON (one record per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact chart payload JSON
    Json,
    /// Pretty-printed chart payload JSON
    JsonPretty,
    /// Aligned text grid
    Table,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

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
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), HeatmapCliError> {
    match cli.command {
        Commands::Render {
            input,
            input_format,
            output,
            format,
            config,
            title,
            no_aggregates,
        } => cmd_render(
            input.as_deref(),
            input_format,
            &output,
            format,
            config.as_deref(),
            title,
            no_aggregates,
        ),

        Commands::Stats {
            input,
            input_format,
            config,
            json,
        } => cmd_stats(input.as_deref(), input_format, config.as_deref(), json),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Seed { ndjson } => cmd_seed(ndjson),
    }
}

fn cmd_render(
    input: Option<&Path>,
    input_format: InputFormat,
    output: &Path,
    format: Option<OutputFormat>,
    config_path: Option<&Path>,
    title: Option<String>,
    no_aggregates: bool,
) -> Result<(), HeatmapCliError> {
    let mut config = match config_path {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };
    if let Some(title) = title {
        config.title = title;
    }
    if no_aggregates {
        config.show_aggregates = false;
    }
    config.validate()?;

    let records = load_records(input, &input_format)?;
    let data = build_heatmap(&records)?;

    let writes_to_stdout = is_stdio(output);
    let format = format.unwrap_or_else(|| {
        if writes_to_stdout && atty::is(atty::Stream::Stdout) {
            OutputFormat::Table
        } else {
            OutputFormat::JsonPretty
        }
    });

    let output_data = match format {
        OutputFormat::Table => TableRenderer::new(config.average_precision)
            .with_aggregates(config.show_aggregates)
            .render(&data),
        OutputFormat::Json => {
            let payload = ChartEncoder::new().encode(&data, &config)?;
            serde_json::to_string(&payload)? + "\n"
        }
        OutputFormat::JsonPretty => ChartEncoder::new().encode_to_json(&data, &config)? + "\n",
    };

    if writes_to_stdout {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
        tracing::info!(path = %output.display(), "wrote chart output");
    }

    Ok(())
}

fn cmd_stats(
    input: Option<&Path>,
    input_format: InputFormat,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), HeatmapCliError> {
    let config = match config_path {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };
    config.validate()?;
    let precision = config.average_precision;

    let records = load_records(input, &input_format)?;
    let stats = compute_statistics(&records)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", TableRenderer::new(precision).render_statistics(&stats));
    }

    Ok(())
}

fn cmd_validate(
    input: &Path,
    input_format: InputFormat,
    json: bool,
) -> Result<(), HeatmapCliError> {
    let raw = parse_raw(&read_input(input)?, &input_format)?;
    let failures = RawRecordAdapter::validate_records(&raw);

    let report = ValidationReport {
        total_records: raw.len(),
        valid_records: raw.len() - failures.len(),
        invalid_records: failures.len(),
        errors: failures
            .iter()
            .map(|f| ValidationErrorDetail {
                index: f.index,
                name: f.name.clone(),
                error: f.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - {} (index {}): {}", err.name, err.index, err.error);
            }
        }
    }

    if report.total_records == 0 {
        Err(HeatmapCliError::NoRecords)
    } else if report.invalid_records > 0 {
        Err(HeatmapCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_seed(ndjson: bool) -> Result<(), HeatmapCliError> {
    let store = RecordStore::seeded()?;
    let raw: Vec<RawRecord> = store.records().iter().map(RawRecord::from).collect();

    if ndjson {
        for record in &raw {
            println!("{}", serde_json::to_string(record)?);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&raw)?);
    }

    Ok(())
}

// Helper functions

fn is_stdio(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

fn read_input(input: &Path) -> Result<String, HeatmapCliError> {
    if is_stdio(input) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_raw(data: &str, format: &InputFormat) -> Result<Vec<RawRecord>, HeatmapCliError> {
    let raw = match format {
        InputFormat::Json => RawRecordAdapter::parse_array(data)?,
        InputFormat::Ndjson => RawRecordAdapter::parse_ndjson(data)?,
    };
    Ok(raw)
}

fn load_records(
    input: Option<&Path>,
    format: &InputFormat,
) -> Result<Vec<WeekdayRecord>, HeatmapCliError> {
    match input {
        Some(path) => {
            let raw = parse_raw(&read_input(path)?, format)?;
            if raw.is_empty() {
                return Err(HeatmapCliError::NoRecords);
            }
            tracing::debug!(records = raw.len(), "parsed record input");
            Ok(RawRecordAdapter::to_records(&raw)?)
        }
        None => Ok(RecordStore::seeded()?.into_records()),
    }
}

// Error types

#[derive(Debug)]
enum HeatmapCliError {
    Io(io::Error),
    Compute(weekday_heatmap::ComputeError),
    Json(serde_json::Error),
    NoRecords,
    ValidationFailed(usize),
}

impl From<io::Error> for HeatmapCliError {
    fn from(e: io::Error) -> Self {
        HeatmapCliError::Io(e)
    }
}

impl From<weekday_heatmap::ComputeError> for HeatmapCliError {
    fn from(e: weekday_heatmap::ComputeError) -> Self {
        HeatmapCliError::Compute(e)
    }
}

impl From<serde_json::Error> for HeatmapCliError {
    fn from(e: serde_json::Error) -> Self {
        HeatmapCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<HeatmapCliError> for CliError {
    fn from(e: HeatmapCliError) -> Self {
        use weekday_heatmap::ComputeError;

        match e {
            HeatmapCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            HeatmapCliError::Compute(e) => {
                let (code, hint) = match &e {
                    ComputeError::EmptyInput => ("EMPTY_INPUT", "Provide at least one record"),
                    ComputeError::MissingWeekdayKey { .. } => (
                        "MISSING_WEEKDAY",
                        "Every record needs monday through friday",
                    ),
                    ComputeError::InvalidRecord(_) => {
                        ("INVALID_RECORD", "Run 'heatmap validate' for details")
                    }
                    ComputeError::ConfigError(_) => {
                        ("CONFIG_ERROR", "Check the chart configuration file")
                    }
                    _ => ("PARSE_ERROR", "Ensure input matches the record schema"),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            HeatmapCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            HeatmapCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            HeatmapCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    name: String,
    error: String,
}
